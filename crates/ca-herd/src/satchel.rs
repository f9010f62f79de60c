//! `Satchel`: a slot-limited in-memory [`Inventory`].
//!
//! Tools are kept apart from item stacks and never count toward the slot
//! limit, so a full satchel can still be dumped without losing its shears.

use ca_core::{ItemKind, ItemStack, ToolType};
use ca_fsm::ActionError;
use tracing::debug;

use crate::collab::Inventory;

/// Items per stack.
pub const MAX_STACK: u32 = 64;

/// Durability of a freshly made tool.
pub fn max_durability(tool: ToolType) -> u32 {
    match tool {
        ToolType::Shears => 238,
        ToolType::Axe    => 250,
        ToolType::Hoe    => 250,
    }
}

/// One carried tool.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tool {
    pub kind:       ToolType,
    pub durability: u32,
    pub fortune:    u32,
}

impl Tool {
    pub fn new(kind: ToolType) -> Self {
        Self { kind, durability: max_durability(kind), fortune: 0 }
    }
}

#[derive(Clone, Debug)]
pub struct Satchel {
    slots:  usize,
    stacks: Vec<ItemStack>,
    tools:  Vec<Tool>,
    held:   Option<usize>,
}

impl Satchel {
    /// An empty satchel with `slots` item slots.
    pub fn new(slots: usize) -> Self {
        Self { slots, stacks: Vec::new(), tools: Vec::new(), held: None }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// The held tool's current durability.
    pub fn held_durability(&self) -> Option<u32> {
        self.held.map(|i| self.tools[i].durability)
    }
}

impl Inventory for Satchel {
    fn add_item(&mut self, stack: ItemStack) -> Result<(), ActionError> {
        if let ItemKind::Tool(kind) = stack.kind {
            for _ in 0..stack.count {
                self.tools.push(Tool::new(kind));
            }
            return Ok(());
        }

        let mut left = stack.count;
        for existing in self.stacks.iter_mut().filter(|s| s.kind == stack.kind) {
            let room = MAX_STACK - existing.count.min(MAX_STACK);
            let moved = room.min(left);
            existing.count += moved;
            left -= moved;
            if left == 0 {
                return Ok(());
            }
        }
        while left > 0 {
            if self.stacks.len() >= self.slots {
                return Err(ActionError::collaborator(
                    "inventory",
                    format!("no room for {left}x {}", stack.kind),
                ));
            }
            let moved = left.min(MAX_STACK);
            self.stacks.push(ItemStack::new(stack.kind, moved));
            left -= moved;
        }
        Ok(())
    }

    fn can_hold(&self, stack: &ItemStack) -> bool {
        if stack.kind.is_tool() {
            return true;
        }
        let topped: u32 = self
            .stacks
            .iter()
            .filter(|s| s.kind == stack.kind)
            .map(|s| MAX_STACK - s.count.min(MAX_STACK))
            .sum();
        let free = self.slots.saturating_sub(self.stacks.len()) as u32;
        topped.saturating_add(free.saturating_mul(MAX_STACK)) >= stack.count
    }

    fn has_tool(&self, tool: ToolType) -> bool {
        self.tools.iter().any(|t| t.kind == tool)
    }

    fn equip(&mut self, tool: ToolType) -> bool {
        match self.tools.iter().position(|t| t.kind == tool) {
            Some(i) => {
                self.held = Some(i);
                true
            }
            None => false,
        }
    }

    fn held_tool(&self) -> Option<ToolType> {
        self.held.map(|i| self.tools[i].kind)
    }

    fn damage_held_tool(&mut self, amount: u32) -> Result<(), ActionError> {
        let Some(i) = self.held else {
            return Err(ActionError::collaborator("inventory", "no tool in hand"));
        };
        let tool = &mut self.tools[i];
        tool.durability = tool.durability.saturating_sub(amount);
        if tool.durability == 0 {
            debug!(tool = %tool.kind, "tool broke");
            self.tools.remove(i);
            self.held = None;
        }
        Ok(())
    }

    fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Tool(t) => self.tools.iter().filter(|tool| tool.kind == t).count() as u32,
            _ => self.stacks.iter().filter(|s| s.kind == kind).map(|s| s.count).sum(),
        }
    }

    fn remove(&mut self, kind: ItemKind, count: u32) -> Result<(), ActionError> {
        if kind.is_tool() || self.count(kind) < count {
            return Err(ActionError::collaborator(
                "inventory",
                format!("cannot take {count}x {kind}"),
            ));
        }
        let mut left = count;
        for stack in self.stacks.iter_mut().filter(|s| s.kind == kind) {
            let taken = stack.count.min(left);
            stack.count -= taken;
            left -= taken;
            if left == 0 {
                break;
            }
        }
        self.stacks.retain(|s| !s.is_empty());
        Ok(())
    }

    fn is_full(&self) -> bool {
        self.stacks.len() >= self.slots
    }

    fn loot(&self) -> Vec<ItemStack> {
        self.stacks.clone()
    }

    fn fortune(&self) -> u32 {
        self.held.map_or(0, |i| self.tools[i].fortune)
    }
}
