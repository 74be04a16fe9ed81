//! Equip request resolution.
//!
//! Every multi-slot request is atomic: matching runs in two phases, first
//! reserving parts without touching the body, then committing the whole
//! claim. A failed request leaves the body exactly as it was; callers never
//! observe a partially equipped item.

use crate::body::Body;
use crate::errors::CoreError;
use crate::item::ItemId;

/// Equip `item` onto one free part per requested position type. Repeated
/// types claim distinct parts: asking for `["hand", "hand"]` needs two free
/// hands, never the same hand twice.
///
/// Fails with [`CoreError::InsufficientFreeSlots`] when any requested type
/// cannot be matched to a still-free, not-yet-claimed part; nothing is
/// equipped on failure.
pub fn equip_by_types(body: &mut Body, item: ItemId, types: &[&str]) -> Result<(), CoreError> {
    if types.is_empty() {
        return Err(CoreError::InsufficientFreeSlots {
            requested: 0,
            matched: 0,
        });
    }

    // reservation phase: claim part indices without mutating the body
    let mut reserved: Vec<usize> = Vec::with_capacity(types.len());
    for wanted in types {
        let slot = body.parts().enumerate().position(|(index, part)| {
            part.position_type().eq_ignore_ascii_case(wanted)
                && part.is_free()
                && !reserved.contains(&index)
        });
        match slot {
            Some(index) => reserved.push(index),
            None => {
                return Err(CoreError::InsufficientFreeSlots {
                    requested: types.len(),
                    matched: reserved.len(),
                })
            }
        }
    }

    // commit phase
    let parts = body.parts_mut();
    for index in reserved {
        parts[index].equipment.push(item);
    }
    Ok(())
}

/// Equip `item` onto exactly the named parts. Fails with
/// [`CoreError::SlotNotFound`] for a missing name and
/// [`CoreError::SlotOccupied`] when a part is taken or the same part is named
/// twice; nothing is equipped on failure.
pub fn equip_by_names(body: &mut Body, item: ItemId, names: &[&str]) -> Result<(), CoreError> {
    if names.is_empty() {
        return Err(CoreError::InsufficientFreeSlots {
            requested: 0,
            matched: 0,
        });
    }

    let mut reserved: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        let index = body
            .part_index(name)
            .ok_or_else(|| CoreError::SlotNotFound(name.to_string()))?;
        if reserved.contains(&index) || !body.parts().nth(index).expect("indexed part").is_free() {
            return Err(CoreError::SlotOccupied(name.to_string()));
        }
        reserved.push(index);
    }

    let parts = body.parts_mut();
    for index in reserved {
        parts[index].equipment.push(item);
    }
    Ok(())
}

/// Equip `item` onto the named parts with layering rules. A part is eligible
/// when it is empty, or `force` is set, or `conflict_type` is given and none
/// of the items already on the part carries that type (so a cloak layers
/// over a shirt, but a second shirt is blocked). `is_type` answers whether an
/// equipped item carries a given type, since item data lives outside the body.
///
/// Same all-or-nothing contract as the other entry points.
pub fn equip_by_names_ex(
    body: &mut Body,
    item: ItemId,
    names: &[&str],
    conflict_type: Option<&str>,
    force: bool,
    is_type: impl Fn(ItemId, &str) -> bool,
) -> Result<(), CoreError> {
    if names.is_empty() {
        return Err(CoreError::InsufficientFreeSlots {
            requested: 0,
            matched: 0,
        });
    }

    let mut reserved: Vec<usize> = Vec::with_capacity(names.len());
    for name in names {
        let index = body
            .part_index(name)
            .ok_or_else(|| CoreError::SlotNotFound(name.to_string()))?;
        if reserved.contains(&index) {
            return Err(CoreError::SlotOccupied(name.to_string()));
        }
        let part = body.parts().nth(index).expect("indexed part");
        let eligible = if force || part.is_free() {
            true
        } else if let Some(conflict) = conflict_type {
            if part.equipment().iter().any(|&worn| is_type(worn, conflict)) {
                return Err(CoreError::TypeConflict {
                    part: name.to_string(),
                    conflict_type: conflict.to_string(),
                });
            }
            true
        } else {
            false
        };
        if !eligible {
            return Err(CoreError::SlotOccupied(name.to_string()));
        }
        reserved.push(index);
    }

    let parts = body.parts_mut();
    for index in reserved {
        parts[index].equipment.push(item);
    }
    Ok(())
}

/// Remove `item` from every part holding it. Returns whether it was found
/// anywhere.
pub fn unequip(body: &mut Body, item: ItemId) -> bool {
    let mut found = false;
    for part in body.parts_mut() {
        let before = part.equipment.len();
        part.equipment.retain(|&worn| worn != item);
        found |= part.equipment.len() != before;
    }
    found
}

/// Clear every part and return the distinct set of items that were removed;
/// an item spanning several parts is listed once.
pub fn unequip_all(body: &mut Body) -> Vec<ItemId> {
    let removed = body.all_equipment();
    for part in body.parts_mut() {
        part.equipment.clear();
    }
    removed
}
