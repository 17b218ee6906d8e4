//! Damped Spring
//!
//! Exact step of a damped harmonic oscillator over a fixed time step. The
//! four coefficients are solved once per configuration; each tick is then
//! two multiply-adds and stays exact at any frequency.
//!
//! Follows Ryan Juckett's formulation with separate over-, under- and
//! critically-damped branches.

/// Time step for a tick rate in frames per second
pub fn fps(rate: u32) -> f64 {
    1.0 / f64::from(rate.max(1))
}

/// Precomputed spring step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pos_pos: f64,
    pos_vel: f64,
    vel_pos: f64,
    vel_vel: f64,
}

impl Spring {
    /// Solve the step coefficients
    ///
    /// * `delta_time` - seconds per tick, see [`fps`]
    /// * `angular_frequency` - stiffness; 0 freezes the spring
    /// * `damping_ratio` - <1 oscillates, 1 is critical, >1 creeps
    ///
    /// Negative or non-finite inputs are treated as 0.
    pub fn new(delta_time: f64, angular_frequency: f64, damping_ratio: f64) -> Self {
        let dt = sanitize(delta_time);
        let omega = sanitize(angular_frequency);
        let zeta = sanitize(damping_ratio);

        if omega < f64::EPSILON {
            return Self::identity();
        }

        if zeta > 1.0 + f64::EPSILON {
            // Over-damped
            let za = -omega * zeta;
            let zb = omega * (zeta * zeta - 1.0).sqrt();
            let z1 = za - zb;
            let z2 = za + zb;

            let e1 = (z1 * dt).exp();
            let e2 = (z2 * dt).exp();

            let inv_two_zb = 1.0 / (2.0 * zb);
            let e1_over_two_zb = e1 * inv_two_zb;
            let e2_over_two_zb = e2 * inv_two_zb;
            let z1e1_over_two_zb = z1 * e1_over_two_zb;
            let z2e2_over_two_zb = z2 * e2_over_two_zb;

            Self {
                pos_pos: e1_over_two_zb * z2 - z2e2_over_two_zb + e2,
                pos_vel: -e1_over_two_zb + e2_over_two_zb,
                vel_pos: (z1e1_over_two_zb - z2e2_over_two_zb + e2) * z2,
                vel_vel: -z1e1_over_two_zb + z2e2_over_two_zb,
            }
        } else if zeta < 1.0 - f64::EPSILON {
            // Under-damped
            let omega_zeta = omega * zeta;
            let alpha = omega * (1.0 - zeta * zeta).sqrt();

            let exp_term = (-omega_zeta * dt).exp();
            let cos_term = (alpha * dt).cos();
            let sin_term = (alpha * dt).sin();

            let inv_alpha = 1.0 / alpha;
            let exp_sin = exp_term * sin_term;
            let exp_cos = exp_term * cos_term;
            let exp_omega_zeta_sin_over_alpha = exp_term * omega_zeta * sin_term * inv_alpha;

            Self {
                pos_pos: exp_cos + exp_omega_zeta_sin_over_alpha,
                pos_vel: exp_sin * inv_alpha,
                vel_pos: -exp_sin * alpha - omega_zeta * exp_omega_zeta_sin_over_alpha,
                vel_vel: exp_cos - exp_omega_zeta_sin_over_alpha,
            }
        } else {
            // Critically damped
            let exp_term = (-omega * dt).exp();
            let time_exp = dt * exp_term;
            let time_exp_freq = time_exp * omega;

            Self {
                pos_pos: time_exp_freq + exp_term,
                pos_vel: time_exp,
                vel_pos: -omega * time_exp_freq,
                vel_vel: -time_exp_freq + exp_term,
            }
        }
    }

    /// A spring that never moves
    pub fn identity() -> Self {
        Self {
            pos_pos: 1.0,
            pos_vel: 0.0,
            vel_pos: 0.0,
            vel_vel: 1.0,
        }
    }

    /// Advance one tick toward `target`, returning the new `(position, velocity)`
    pub fn update(&self, position: f64, velocity: f64, target: f64) -> (f64, f64) {
        let offset = position - target;
        let new_position = offset * self.pos_pos + velocity * self.pos_vel + target;
        let new_velocity = offset * self.vel_pos + velocity * self.vel_vel;
        (new_position, new_velocity)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
