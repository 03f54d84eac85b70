//! When a held path must be recomputed
//!
//! A blocker that has stepped onto our remaining path only matters once it
//! is close; far away it will likely have moved on before we arrive.

use crate::grid::cell::Cell;

/// True when the blocker sits on the remaining path and within `radius` of the follower
pub fn should_replan(path: &[Cell], follower: Cell, blocker: Option<Cell>, radius: u32) -> bool {
    let Some(blocker) = blocker else {
        return false;
    };

    follower.chebyshev(&blocker) <= radius && path.contains(&blocker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Vec<Cell> {
        (1..=6).map(|x| Cell::new(x, 0)).collect()
    }

    #[test]
    fn test_no_blocker_never_replans() {
        assert!(!should_replan(&corridor(), Cell::new(0, 0), None, 3));
    }

    #[test]
    fn test_near_blocker_on_path_replans() {
        assert!(should_replan(&corridor(), Cell::new(0, 0), Some(Cell::new(2, 0)), 3));
        // Boundary: exactly at the radius
        assert!(should_replan(&corridor(), Cell::new(0, 0), Some(Cell::new(3, 0)), 3));
    }

    #[test]
    fn test_far_blocker_on_path_is_ignored() {
        assert!(!should_replan(&corridor(), Cell::new(0, 0), Some(Cell::new(5, 0)), 3));
    }

    #[test]
    fn test_near_blocker_off_path_is_ignored() {
        assert!(!should_replan(&corridor(), Cell::new(0, 0), Some(Cell::new(1, 1)), 3));
    }

    #[test]
    fn test_empty_path_never_replans() {
        assert!(!should_replan(&[], Cell::new(0, 0), Some(Cell::new(1, 0)), 3));
    }

    #[test]
    fn test_radius_is_chebyshev() {
        let path = vec![Cell::new(3, 3)];
        assert!(should_replan(&path, Cell::new(0, 0), Some(Cell::new(3, 3)), 3));
        assert!(!should_replan(&path, Cell::new(0, 0), Some(Cell::new(3, 3)), 2));
    }
}
