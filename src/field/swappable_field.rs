use super::{ChannelLayout, Field, Grid};

/// Two fields of identical shape used as a ping-pong pair.
///
/// The front field is the last one fully written and is safe to read. The
/// back field is the write target for the next dispatch. Swapping exchanges
/// the designation only, contents are never copied.
pub struct SwappableField {
    fields: [Field; 2],
    front: usize,
}

impl SwappableField {
    pub fn new(grid: Grid, layout: ChannelLayout, label: &str) -> Self {
        Self {
            fields: [
                Field::new(grid, layout, format!("{} (a)", label)),
                Field::new(grid, layout, format!("{} (b)", label)),
            ],
            front: 0,
        }
    }

    pub fn front(&self) -> &Field {
        &self.fields[self.front]
    }

    pub fn back(&self) -> &Field {
        &self.fields[1 - self.front]
    }

    /// Host access to the front field, used to upload initial conditions.
    pub fn front_mut(&mut self) -> &mut Field {
        &mut self.fields[self.front]
    }

    /// Borrow the front for reading and the back for writing at the same
    /// time. A dispatch built from this pair can never alias its input and
    /// output.
    pub fn split_mut(&mut self) -> (&Field, &mut Field) {
        let (first, second) = self.fields.split_at_mut(1);
        if self.front == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Make the back field the new front.
    pub fn swap_buffers(&mut self) {
        self.front = 1 - self.front;
    }

    pub fn grid(&self) -> &Grid {
        self.front().grid()
    }

    pub fn layout(&self) -> ChannelLayout {
        self.front().layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn swap_exchanges_identity_without_copying() {
        let grid = Grid::new(3, 3).unwrap();
        let mut pair = SwappableField::new(grid, ChannelLayout::Vector, "u");
        let front = pair.front().id();
        let back = pair.back().id();

        {
            let (_, back_field) = pair.split_mut();
            back_field.set(1, 1, Vec2::new(2.0, -2.0));
        }
        pair.swap_buffers();

        assert_eq!(pair.front().id(), back);
        assert_eq!(pair.back().id(), front);
        assert_eq!(pair.front().at(1, 1), Vec2::new(2.0, -2.0));
        assert_eq!(pair.back().at(1, 1), Vec2::zeros());
    }

    #[test]
    fn split_mut_follows_the_front_designation() {
        let grid = Grid::new(3, 3).unwrap();
        let mut pair = SwappableField::new(grid, ChannelLayout::Scalar, "p");
        pair.swap_buffers();
        let expected_front = pair.front().id();
        let expected_back = pair.back().id();

        let (front, back) = pair.split_mut();
        assert_eq!(front.id(), expected_front);
        assert_eq!(back.id(), expected_back);
    }
}
