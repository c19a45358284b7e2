use beam_optics::beam::GaussianBeam;
use beam_optics::elements::{Element, Lens, OLYMPUS_TUBE_LENGTH};
use beam_optics::propagation::propagate;

fn main() -> Result<(), beam_optics::errors::OpticsError> {
    // 10 mW HeNe beam, 1 mm waist, focused by a 20x objective.
    let mut beam = GaussianBeam::new(10e-3, 632.8e-9, 1e-3, f64::INFINITY)?
        .with_record_step(1e-3)?;

    let objective = Lens::objective(20.0, OLYMPUS_TUBE_LENGTH);
    let f = objective.focal_length();
    let mut line = vec![
        Element::from(f),
        Element::from(objective),
        Element::from(f),
    ];

    propagate(&mut beam, line.iter_mut())?;
    beam.summary(Some("at the objective focus:"));

    println!();
    println!("waist_offset(m), width(m), curvature(m)");
    for snapshot in beam.history() {
        println!(
            "{:.6e}, {:.6e}, {:.6e}",
            snapshot.waist_offset, snapshot.width, snapshot.curvature
        );
    }
    Ok(())
}
