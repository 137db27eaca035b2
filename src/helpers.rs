// Boolean combinators used by the UI for conditional rendering and key handling.

/// True if any condition holds. False for no conditions.
pub fn is_one_of_true(conditions: &[bool]) -> bool {
    conditions.contains(&true)
}

/// True if every condition holds. True for no conditions.
pub fn are_all_true(conditions: &[bool]) -> bool {
    conditions.iter().all(|&condition| condition)
}
