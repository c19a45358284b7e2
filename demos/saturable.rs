use beam_optics::absorber::{LinearAbsorber, SaturableAbsorber};
use beam_optics::beam::GaussianBeam;

fn main() -> Result<(), beam_optics::errors::OpticsError> {
    // 800 nm pulse train at 1 kHz; sweep the pulse energy through the
    // saturation knee and compare against the Beer-Lambert prediction.
    let linear = LinearAbsorber::new(1e-20, 1e24, 1e-3);

    println!("pulse_energy(J), linear_out(J), saturable_out(J), remaining_density(1/m^3)");
    for exponent in -7..=-2 {
        let energy = 10.0_f64.powi(exponent);
        let rate = 1e3;

        let mut through_linear = GaussianBeam::new(energy * rate, 800e-9, 1e-3, f64::INFINITY)?
            .with_repetition_rate(rate)?;
        linear.transmit(&mut through_linear)?;

        // Fresh absorber per energy so depletion does not leak across rows.
        let mut absorber = SaturableAbsorber::new(1e-20, 1e24, 1e-3);
        let mut through_saturable =
            GaussianBeam::new(energy * rate, 800e-9, 1e-3, f64::INFINITY)?
                .with_repetition_rate(rate)?;
        absorber.transmit(&mut through_saturable)?;

        println!(
            "{:.3e}, {:.6e}, {:.6e}, {:.6e}",
            energy,
            through_linear.pulse_energy().unwrap_or(0.0),
            through_saturable.pulse_energy().unwrap_or(0.0),
            absorber.number_density(),
        );
    }
    Ok(())
}
