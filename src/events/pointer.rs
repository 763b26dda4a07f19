use crate::config::InteractionParams;
use crate::core::constants::{
    CLICK_RIPPLE_DEPTH, DRAG_OFFSET_DECAY, DRAG_OFFSET_GAIN, DRAG_VELOCITY_DECAY,
    DRAG_VELOCITY_GAIN,
};
use glam::{Vec2, Vec3};

/// Pointer in normalised device coordinates: `[-1, 1]`, +y up.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub over: bool,
    pub down: bool,
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub velocity: Vec2,
    pub offset: Vec2,
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PokeState {
    pub force: f32,
}

/// Everything the input layer feeds into the core between ticks.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    pub pointer: PointerState,
    pub drag: DragState,
    pub poke: PokeState,
}

/// Window pixel position to NDC.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(client_x / w * 2.0 - 1.0, -(client_y / h) * 2.0 + 1.0)
}

impl Interaction {
    pub fn pointer_ndc(&self) -> Vec2 {
        Vec2::new(self.pointer.x, self.pointer.y)
    }

    pub fn move_to(&mut self, ndc: Vec2) {
        let p = &mut self.pointer;
        p.prev_x = p.x;
        p.prev_y = p.y;
        p.x = ndc.x;
        p.y = ndc.y;
        if p.down {
            self.drag.velocity = Vec2::new(p.x - p.prev_x, p.y - p.prev_y) * DRAG_VELOCITY_GAIN;
        }
    }

    /// Press at the current pointer position. Returns the direction a
    /// click ripple should be seeded at.
    pub fn press(&mut self, params: &InteractionParams) -> Vec3 {
        self.pointer.down = true;
        self.poke.force = params.poke_force;
        log::debug!("[pointer] press at ({:.2},{:.2})", self.pointer.x, self.pointer.y);
        Vec3::new(self.pointer.x, self.pointer.y, CLICK_RIPPLE_DEPTH)
    }

    pub fn release(&mut self) {
        self.pointer.down = false;
    }

    pub fn enter(&mut self) {
        self.pointer.over = true;
    }

    pub fn leave(&mut self) {
        self.pointer.over = false;
        self.pointer.down = false;
    }

    /// Touch start: a press that also marks the pointer as over the canvas.
    pub fn touch_start(&mut self, ndc: Vec2, params: &InteractionParams) -> Vec3 {
        self.move_to(ndc);
        self.pointer.over = true;
        self.press(params)
    }

    pub fn touch_end(&mut self) {
        self.leave();
    }

    /// Drag offset follows drag velocity, both relax every tick.
    pub fn tick_drag(&mut self) {
        let d = &mut self.drag;
        d.offset += d.velocity * DRAG_OFFSET_GAIN;
        d.velocity *= DRAG_VELOCITY_DECAY;
        d.offset *= DRAG_OFFSET_DECAY;
    }

    pub fn decay_poke(&mut self, params: &InteractionParams) {
        self.poke.force *= params.poke_decay;
    }

    /// Hover attraction only applies while the pointer is over the canvas.
    pub fn mouse_influence(&self, params: &InteractionParams) -> f32 {
        if self.pointer.over {
            params.mouse_influence
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        assert_eq!(client_to_ndc(0.0, 0.0, 200.0, 100.0), Vec2::new(-1.0, 1.0));
        assert_eq!(client_to_ndc(200.0, 100.0, 200.0, 100.0), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn drag_velocity_only_while_down() {
        let mut i = Interaction::default();
        i.move_to(Vec2::new(0.1, 0.0));
        assert_eq!(i.drag.velocity, Vec2::ZERO);
        i.press(&InteractionParams::default());
        i.move_to(Vec2::new(0.3, 0.0));
        assert!((i.drag.velocity.x - 1.0).abs() < 1e-5);
    }
}
