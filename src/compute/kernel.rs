use crate::{
    field::Field,
    math::{spaces, Vec2},
};

/// Gradients shorter than this are treated as having no direction.
const DIRECTION_EPSILON: f32 = 1e-12;

/// A pure per-cell transform. Each variant carries its own parameters, so
/// dispatching a kernel never depends on previously selected state.
///
/// Inputs are listed per variant in the order they must be passed to
/// [super::ComputeBackend::dispatch]. Positions are in texture space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Kernel {
    /// `[]` -> zero
    Clear,

    /// `[source]` -> source
    Copy,

    /// `[velocity, quantity]` -> quantity traced back along velocity by
    /// `dt`, scaled by `dissipation`.
    Advect { dt: f32, dissipation: f32 },

    /// `[velocity]` -> velocity plus a force splat with a gaussian falloff.
    Impulse {
        position: Vec2,
        force: Vec2,
        radius: f32,
        dt: f32,
    },

    /// `[velocity]` -> velocity pushed away from `position`.
    RadialImpulse {
        position: Vec2,
        strength: f32,
        radius: f32,
        dt: f32,
    },

    /// `[velocity]` -> scalar curl.
    Vorticity,

    /// `[velocity, vorticity]` -> velocity plus the confinement force.
    AddVorticity { confinement: f32, dt: f32 },

    /// `[x, b]` -> one Jacobi relaxation of `x`.
    Jacobi { alpha: f32, beta: f32 },

    /// `[velocity]` -> scalar divergence.
    Divergence,

    /// `[scalar]` -> gradient.
    Gradient,

    /// `[a, b]` -> a - b
    Subtract,

    /// `[field]` -> `scale` times the neighbor at `inward`.
    Boundary { scale: f32, inward: (isize, isize) },
}

impl Kernel {
    /// Every kernel a backend must support, by name.
    pub const NAMES: &'static [&'static str] = &[
        "clear",
        "copy",
        "advect",
        "impulse",
        "radial_impulse",
        "vorticity",
        "add_vorticity",
        "jacobi",
        "divergence",
        "gradient",
        "subtract",
        "boundary",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Clear => "clear",
            Kernel::Copy => "copy",
            Kernel::Advect { .. } => "advect",
            Kernel::Impulse { .. } => "impulse",
            Kernel::RadialImpulse { .. } => "radial_impulse",
            Kernel::Vorticity => "vorticity",
            Kernel::AddVorticity { .. } => "add_vorticity",
            Kernel::Jacobi { .. } => "jacobi",
            Kernel::Divergence => "divergence",
            Kernel::Gradient => "gradient",
            Kernel::Subtract => "subtract",
            Kernel::Boundary { .. } => "boundary",
        }
    }

    pub fn input_count(&self) -> usize {
        match self {
            Kernel::Advect { .. }
            | Kernel::AddVorticity { .. }
            | Kernel::Jacobi { .. }
            | Kernel::Subtract => 2,
            Kernel::Clear => 0,
            _ => 1,
        }
    }

    /// Compute the output value of cell `(x, y)`.
    ///
    /// Neighbor reads outside the grid clamp to the edge.
    pub fn evaluate(&self, inputs: &[&Field], x: usize, y: usize) -> Vec2 {
        // only Clear reads nothing
        let field = match inputs.first() {
            Some(field) => *field,
            None => return Vec2::zeros(),
        };
        let scale = field.grid().grid_scale();
        let (ix, iy) = (x as isize, y as isize);
        let left = || field.texel(ix - 1, iy);
        let right = || field.texel(ix + 1, iy);
        let below = || field.texel(ix, iy - 1);
        let above = || field.texel(ix, iy + 1);

        match *self {
            Kernel::Clear => Vec2::zeros(),

            Kernel::Copy => field.at(x, y),

            Kernel::Advect { dt, dissipation } => {
                let origin = spaces::cell_center(x, y, &scale)
                    - field.at(x, y) * dt;
                inputs[1].sample(&origin) * dissipation
            }

            Kernel::Impulse {
                position,
                force,
                radius,
                dt,
            } => {
                let offset = spaces::cell_center(x, y, &scale) - position;
                let falloff = (-offset.norm_squared() / radius).exp();
                field.at(x, y) + force * (dt * falloff)
            }

            Kernel::RadialImpulse {
                position,
                strength,
                radius,
                dt,
            } => {
                let offset = spaces::cell_center(x, y, &scale) - position;
                let falloff = (-offset.norm_squared() / radius).exp();
                field.at(x, y)
                    + direction(&offset) * (strength * dt * falloff)
            }

            Kernel::Vorticity => {
                let curl = (right().y - left().y) / (2.0 * scale.x)
                    - (above().x - below().x) / (2.0 * scale.y);
                Vec2::new(curl, 0.0)
            }

            Kernel::AddVorticity { confinement, dt } => {
                let vorticity = inputs[1];
                let magnitude = |dx: isize, dy: isize| {
                    vorticity.texel(ix + dx, iy + dy).x.abs()
                };
                let eta = Vec2::new(
                    (magnitude(1, 0) - magnitude(-1, 0)) / (2.0 * scale.x),
                    (magnitude(0, 1) - magnitude(0, -1)) / (2.0 * scale.y),
                );
                let n = direction(&eta);
                let curl = vorticity.at(x, y).x;
                let force = Vec2::new(n.y * curl, -n.x * curl) * confinement;
                field.at(x, y) + force * dt
            }

            Kernel::Jacobi { alpha, beta } => {
                let b = inputs[1].at(x, y);
                (left() + right() + below() + above() + b * alpha) / beta
            }

            Kernel::Divergence => {
                let divergence = (right().x - left().x) / (2.0 * scale.x)
                    + (above().y - below().y) / (2.0 * scale.y);
                Vec2::new(divergence, 0.0)
            }

            Kernel::Gradient => Vec2::new(
                (right().x - left().x) / (2.0 * scale.x),
                (above().x - below().x) / (2.0 * scale.y),
            ),

            Kernel::Subtract => field.at(x, y) - inputs[1].at(x, y),

            Kernel::Boundary { scale, inward } => {
                field.texel(ix + inward.0, iy + inward.1) * scale
            }
        }
    }
}

/// The unit vector along `value`, or zero when it has no direction.
fn direction(value: &Vec2) -> Vec2 {
    let length = value.norm();
    if length > DIRECTION_EPSILON {
        value / length
    } else {
        Vec2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ChannelLayout, Grid};

    fn grid() -> Grid {
        Grid::new(10, 10).unwrap()
    }

    fn vector_field(value: impl FnMut(usize, usize) -> Vec2) -> Field {
        let mut field = Field::new(grid(), ChannelLayout::Vector, "u");
        field.fill_with(value);
        field
    }

    fn scalar_field(value: impl FnMut(usize, usize) -> Vec2) -> Field {
        let mut field = Field::new(grid(), ChannelLayout::Scalar, "s");
        field.fill_with(value);
        field
    }

    #[test]
    fn names_cover_every_variant() {
        let kernels = [
            Kernel::Clear,
            Kernel::Copy,
            Kernel::Advect {
                dt: 0.0,
                dissipation: 1.0,
            },
            Kernel::Impulse {
                position: Vec2::zeros(),
                force: Vec2::zeros(),
                radius: 1.0,
                dt: 0.0,
            },
            Kernel::RadialImpulse {
                position: Vec2::zeros(),
                strength: 0.0,
                radius: 1.0,
                dt: 0.0,
            },
            Kernel::Vorticity,
            Kernel::AddVorticity {
                confinement: 0.0,
                dt: 0.0,
            },
            Kernel::Jacobi {
                alpha: 0.0,
                beta: 1.0,
            },
            Kernel::Divergence,
            Kernel::Gradient,
            Kernel::Subtract,
            Kernel::Boundary {
                scale: 1.0,
                inward: (0, 0),
            },
        ];
        let names: Vec<_> = kernels.iter().map(Kernel::name).collect();
        assert_eq!(names, Kernel::NAMES);
    }

    #[test]
    fn advect_of_uniform_flow_shifts_the_quantity() {
        // one cell per unit time along x
        let velocity = vector_field(|_, _| Vec2::new(0.1, 0.0));
        let quantity = vector_field(|x, _| Vec2::new(x as f32, 0.0));
        let kernel = Kernel::Advect {
            dt: 1.0,
            dissipation: 0.5,
        };
        let value = kernel.evaluate(&[&velocity, &quantity], 5, 5);
        assert!((value.x - 2.0).abs() < 1e-5, "{}", value.x);
    }

    #[test]
    fn divergence_and_curl_of_linear_fields() {
        let scale = grid().grid_scale();
        // u = (x, y) in texture space has divergence 2 and no curl
        let expanding = vector_field(|x, y| {
            spaces::cell_center(x, y, &scale)
        });
        let div = Kernel::Divergence.evaluate(&[&expanding], 4, 4);
        let curl = Kernel::Vorticity.evaluate(&[&expanding], 4, 4);
        assert!((div.x - 2.0).abs() < 1e-4);
        assert!(curl.x.abs() < 1e-4);

        // u = (-y, x) rotates with curl 2 and no divergence
        let rotating = vector_field(|x, y| {
            let p = spaces::cell_center(x, y, &scale);
            Vec2::new(-p.y, p.x)
        });
        let div = Kernel::Divergence.evaluate(&[&rotating], 4, 4);
        let curl = Kernel::Vorticity.evaluate(&[&rotating], 4, 4);
        assert!(div.x.abs() < 1e-4);
        assert!((curl.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn gradient_of_a_ramp() {
        let scale = grid().grid_scale();
        let ramp = scalar_field(|x, y| {
            let p = spaces::cell_center(x, y, &scale);
            Vec2::new(3.0 * p.x - p.y, 0.0)
        });
        let gradient = Kernel::Gradient.evaluate(&[&ramp], 5, 5);
        assert!((gradient.x - 3.0).abs() < 1e-4);
        assert!((gradient.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn jacobi_averages_neighbors_with_the_right_hand_side() {
        let x = scalar_field(|x, _| Vec2::new(x as f32, 0.0));
        let b = scalar_field(|_, _| Vec2::new(2.0, 0.0));
        let kernel = Kernel::Jacobi {
            alpha: 4.0,
            beta: 8.0,
        };
        // neighbors 3 + 5 + 4 + 4 = 16, alpha * b = 8
        let value = kernel.evaluate(&[&x, &b], 4, 4);
        assert!((value.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn impulse_is_strongest_at_its_position() {
        let velocity = vector_field(|_, _| Vec2::zeros());
        let scale = grid().grid_scale();
        let kernel = Kernel::Impulse {
            position: spaces::cell_center(5, 5, &scale),
            force: Vec2::new(1.0, 0.0),
            radius: 0.01,
            dt: 0.5,
        };
        let center = kernel.evaluate(&[&velocity], 5, 5);
        let near = kernel.evaluate(&[&velocity], 6, 5);
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!(near.x < center.x && near.x > 0.0);
        assert_eq!(center.y, 0.0);
    }

    #[test]
    fn radial_impulse_points_away_from_center() {
        let velocity = vector_field(|_, _| Vec2::zeros());
        let scale = grid().grid_scale();
        let kernel = Kernel::RadialImpulse {
            position: spaces::cell_center(5, 5, &scale),
            strength: 1.0,
            radius: 0.05,
            dt: 1.0,
        };
        assert_eq!(kernel.evaluate(&[&velocity], 5, 5), Vec2::zeros());
        assert!(kernel.evaluate(&[&velocity], 7, 5).x > 0.0);
        assert!(kernel.evaluate(&[&velocity], 3, 5).x < 0.0);
        assert!(kernel.evaluate(&[&velocity], 5, 2).y < 0.0);
    }

    #[test]
    fn clear_needs_no_inputs() {
        assert_eq!(Kernel::Clear.input_count(), 0);
        assert_eq!(Kernel::Clear.evaluate(&[], 3, 3), Vec2::zeros());
    }

    #[test]
    fn confinement_pushes_across_the_vorticity_gradient() {
        let velocity = vector_field(|_, _| Vec2::new(1.0, 1.0));
        // |w| grows along +x, so the normalized gradient is (1, 0)
        let vorticity = scalar_field(|x, _| Vec2::new(x as f32, 0.0));
        let confine = |confinement: f32| {
            Kernel::AddVorticity {
                confinement,
                dt: 0.1,
            }
            .evaluate(&[&velocity, &vorticity], 4, 4)
        };

        // force = confinement * (N.y w, -N.x w) = 0.5 * (0, -4)
        let pushed = confine(0.5);
        assert!((pushed.x - 1.0).abs() < 1e-6, "{}", pushed.x);
        assert!((pushed.y - 0.8).abs() < 1e-6, "{}", pushed.y);

        // the push scales linearly with the coefficient
        let doubled = confine(1.0);
        assert!((doubled.y - 0.6).abs() < 1e-6, "{}", doubled.y);
        assert_eq!(confine(0.0), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn confinement_ignores_flat_vorticity() {
        let velocity = vector_field(|_, _| Vec2::new(0.25, -0.5));
        let vorticity = scalar_field(|_, _| Vec2::new(3.0, 0.0));
        let kernel = Kernel::AddVorticity {
            confinement: 2.0,
            dt: 1.0,
        };
        assert_eq!(
            kernel.evaluate(&[&velocity, &vorticity], 5, 5),
            Vec2::new(0.25, -0.5)
        );
    }

    #[test]
    fn subtract_removes_the_second_input() {
        let velocity = vector_field(|x, y| Vec2::new(x as f32, y as f32));
        let gradient = vector_field(|_, y| Vec2::new(0.5, y as f32));
        assert_eq!(
            Kernel::Subtract.evaluate(&[&velocity, &gradient], 6, 2),
            Vec2::new(5.5, 0.0)
        );
    }

    #[test]
    fn boundary_reflects_the_inward_neighbor() {
        let field = vector_field(|x, y| Vec2::new(x as f32, y as f32));
        let kernel = Kernel::Boundary {
            scale: -1.0,
            inward: (1, 0),
        };
        assert_eq!(
            kernel.evaluate(&[&field], 0, 3),
            Vec2::new(-1.0, -3.0)
        );
    }
}
