use bevy::prelude::*;

/// Which side a combat entity fights for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// Hit points. Unsigned, so `health >= 0` holds by construction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Saturating subtraction. Returns the amount actually removed.
    #[inline]
    pub fn take(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Raise towards `max`. Returns the amount actually restored.
    #[inline]
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Offset from an entity's transform to the point bullets should aim at and be
/// tested against (chest height).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AimPoint(pub Vec3);

impl Default for AimPoint {
    fn default() -> Self {
        Self(Vec3::ZERO)
    }
}
