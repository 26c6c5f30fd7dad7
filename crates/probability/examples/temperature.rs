use probability::{
    cross_entropy, entropy, temperature_sweep, Distribution, ProbabilityError, TemperatureBand,
};

fn main() -> Result<(), ProbabilityError> {
    let logits = [2.0, 1.0, 0.1];
    let temps = [0.1, 0.5, 1.0, 2.0, 5.0];

    println!("logits: {logits:?}");
    for (t, dist) in temperature_sweep(&logits, &temps)? {
        println!(
            "T={t:<4} probs={:?} entropy={:.3} band={:?}",
            dist.iter().map(|p| format!("{p:.3}")).collect::<Vec<_>>(),
            dist.entropy(),
            TemperatureBand::for_temperature(t),
        );
    }

    let uniform = Distribution::uniform(4)?;
    let confident = [0.9, 0.05, 0.03, 0.02];
    println!("\nuniform entropy:   {:.3}", uniform.entropy());
    println!("confident entropy: {:.3}", entropy(&confident)?);

    let label = Distribution::one_hot(4, 0)?;
    let bad = [0.1, 0.3, 0.3, 0.3];
    println!(
        "\ncross-entropy good={:.3} bad={:.3}",
        cross_entropy(label.as_slice(), &confident)?,
        cross_entropy(label.as_slice(), &bad)?,
    );
    Ok(())
}
