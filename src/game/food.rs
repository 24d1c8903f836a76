use crate::grid::GridPos;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Food {
    pub pos: GridPos,
    /// Seconds left before an uneaten item disappears
    pub timer: f32,
    /// Swallowed by the head, still travelling down the body
    pub eaten: bool,
    pub active: bool,
}

impl Food {
    /// On the field and still edible
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.active && !self.eaten
    }
}

/// Fixed set of food slots, allocated once
#[derive(Debug, Clone)]
pub struct FoodSet {
    slots: Vec<Food>,
}

impl FoodSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Food::default(); capacity],
        }
    }

    /// Deactivate every slot
    pub fn reset(&mut self) {
        self.slots.fill(Food::default());
    }

    /// Place food in the first inactive slot
    pub fn spawn(&mut self, pos: GridPos, lifespan: f32) -> Option<usize> {
        let slot = self.slots.iter().position(|f| !f.active)?;
        self.slots[slot] = Food {
            pos,
            timer: lifespan,
            eaten: false,
            active: true,
        };
        Some(slot)
    }

    /// Count down lifespans. Returns how many uneaten items expired.
    pub fn tick(&mut self, dt: f32) -> usize {
        let mut expired = 0;
        for food in self.slots.iter_mut().filter(|f| f.is_visible()) {
            food.timer -= dt;
            if food.timer <= 0.0 {
                food.active = false;
                expired += 1;
            }
        }
        expired
    }

    /// Mark the edible item at `pos` as eaten
    pub fn eat_at(&mut self, pos: GridPos) -> Option<usize> {
        let slot = self
            .slots
            .iter()
            .position(|f| f.is_visible() && f.pos == pos)?;
        self.slots[slot].eaten = true;
        Some(slot)
    }

    /// Eaten item still being digested at `pos`
    pub fn eaten_at(&self, pos: GridPos) -> Option<usize> {
        self.slots
            .iter()
            .position(|f| f.active && f.eaten && f.pos == pos)
    }

    /// Remove a digested item from the field
    pub fn consume(&mut self, slot: usize) {
        if let Some(food) = self.slots.get_mut(slot) {
            food.eaten = false;
            food.active = false;
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Food> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.slots.iter()
    }

    /// Cells of eaten, undigested items
    pub fn eaten_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.slots
            .iter()
            .filter(|f| f.active && f.eaten)
            .map(|f| f.pos)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|f| f.active).count()
    }
}
