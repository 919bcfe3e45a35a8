//! # Skill Crafting
//!
//! Element and compound-skill definitions, the lookup table built from them,
//! and the crafting pipeline that turns two collected elements into an equipped
//! compound skill.

use crate::constants::{ELEMENTS_PER_SKILL, SKILL_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How something is drawn. The simulation never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualRef {
    pub image_file: String,
    pub scale: f32,
    /// Fallback RGB colour for shape rendering
    pub color: [u8; 3],
}

/// A base pickup type. Elements have no combat stats of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDefinition {
    pub id: String,
    pub visual: VisualRef,
}

/// Attributes of a craftable skill, keyed by two concatenated element ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompoundSkillDefinition {
    /// Compound key, e.g. `FireIce`
    pub id: String,
    pub damage: f32,
    /// Projectile displacement per tick
    pub speed: f32,
    pub mana_cost: f32,
    /// Projectile collision radius
    pub radius: f32,
    pub visual: VisualRef,
}

/// Forms the compound key for elements collected in the given order.
///
/// # Examples
///
/// ```
/// use spellforge::compound_key;
///
/// assert_eq!(compound_key(&["Fire", "Ice"]), "FireIce");
/// assert_ne!(compound_key(&["Fire", "Ice"]), compound_key(&["Ice", "Fire"]));
/// ```
pub fn compound_key<S: AsRef<str>>(elements: &[S]) -> String {
    elements.iter().map(|element| element.as_ref()).collect()
}

/// Read-only lookup over the element and compound-skill tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillTable {
    elements: HashMap<String, ElementDefinition>,
    skills: HashMap<String, CompoundSkillDefinition>,
}

impl SkillTable {
    /// Builds the table. Later duplicates replace earlier ones.
    pub fn new(elements: &[ElementDefinition], skills: &[CompoundSkillDefinition]) -> Self {
        Self {
            elements: elements
                .iter()
                .map(|element| (element.id.clone(), element.clone()))
                .collect(),
            skills: skills
                .iter()
                .map(|skill| (skill.id.clone(), skill.clone()))
                .collect(),
        }
    }

    /// Element definition, or `None` for an unknown id.
    pub fn element(&self, id: &str) -> Option<&ElementDefinition> {
        self.elements.get(id)
    }

    /// Compound skill definition, or `None` for an unknown key.
    pub fn skill(&self, key: &str) -> Option<&CompoundSkillDefinition> {
        self.skills.get(key)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Element ids in sorted order.
    pub fn element_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Pending-combination buffer plus the equipped compound-skill slots.
///
/// Slot 0 holds the most recently crafted key; crafting shifts the previous
/// slot 0 into slot 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCrafter {
    pending: Vec<String>,
    slots: [Option<String>; SKILL_SLOTS],
}

impl SkillCrafter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects an element for crafting.
    ///
    /// When this fills the pending buffer the elements are combined in collection
    /// order, the new key is installed in slot 0 and the buffer is cleared in the
    /// same call. Returns the crafted key, if any.
    pub fn collect(&mut self, element_id: &str) -> Option<String> {
        self.pending.push(element_id.to_string());
        if self.pending.len() < ELEMENTS_PER_SKILL {
            return None;
        }

        let key = compound_key(&self.pending);
        self.pending.clear();
        self.install(key.clone());
        log::debug!("Crafted compound skill {}", key);
        Some(key)
    }

    fn install(&mut self, key: String) {
        for slot in (1..SKILL_SLOTS).rev() {
            self.slots[slot] = self.slots[slot - 1].take();
        }
        self.slots[0] = Some(key);
    }

    /// Elements collected and waiting for a partner.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Compound key equipped in a slot; `None` for an empty or invalid slot.
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn slots(&self) -> &[Option<String>; SKILL_SLOTS] {
        &self.slots
    }
}
