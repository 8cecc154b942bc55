//! Euler integration of a projectile, with positions converted to screen pixels at the end of each tick.

use newtonian::units::{M, S, STANDARD_GRAVITY};
use newtonian::{validated, Dimension, Quantity, Unit, UnitResult};

/// One pixel is a centimetre of simulated space.
const PX: Unit = Unit::from_static("px", Dimension::LENGTH, 0.01);

struct Body {
    position: Quantity,
    velocity: Quantity,
    acceleration: Quantity,
}

impl Body {
    fn new(position: Quantity, velocity: Quantity, acceleration: Quantity) -> UnitResult<Self> {
        position.require_vector(&M, "position")?;
        velocity.require_vector(&(M / S), "velocity")?;
        acceleration.require_vector(&(M / (S * S)), "acceleration")?;
        Ok(Self {
            position,
            velocity,
            acceleration,
        })
    }

    fn update(&mut self, dt: &Quantity) -> UnitResult<()> {
        let drift = self.velocity.mul(dt)?;
        let kick = self.acceleration.mul(&dt.pow(2)?)?.scale(0.5);
        self.position = self.position.add(&drift)?.add(&kick)?;
        self.velocity = self.velocity.add(&self.acceleration.mul(dt)?)?;
        Ok(())
    }
}

#[validated(fallible)]
fn kinetic_energy(mass: Quantity, velocity: Quantity) -> UnitResult<Quantity> {
    let speed = velocity.norm();
    Ok(speed.mul(&speed)?.mul(&mass)?.scale(0.5))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dt = (1.0 / 12.0) * S;
    let mut body = Body::new(
        [200.0, 500.0] * M,
        [3.0, 30.0] * (M / S),
        [0.0, -STANDARD_GRAVITY] * (M / (S * S)),
    )?;

    let energy = kinetic_energy_validated()?;

    for tick in 1..=12 {
        body.update(&dt)?;
        let pixels = body.position.to(&PX)?;
        let e = energy.call_positional(&[
            (2.0 * newtonian::units::KG).into(),
            body.velocity.clone().into(),
        ])?;
        println!("tick {tick:>2}: position {} ({pixels} px), energy {e}", body.position);
    }

    Ok(())
}
