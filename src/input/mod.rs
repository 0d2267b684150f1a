mod climber;

pub use climber::*;

/// Reports a button only on the cycle it goes down.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeTrigger {
    last: bool,
}

impl EdgeTrigger {
    pub fn rising(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.last;
        self.last = pressed;
        rising
    }
}
