//! UCT arithmetic used by the interval tree
//!
//! These helpers are pure functions of the node statistics so they can be
//! checked independently of any tree.

/// Calculates the exploitation term for UCT
///
/// This is the observed win rate of a node.
pub fn exploitation_term(wins: u64, visits: u64) -> f64 {
    win_rate(wins, visits)
}

/// Calculates the exploration term for UCT
///
/// This is the bonus that keeps rarely sampled chunks competitive.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT value of a child
///
/// `wins / visits + C * sqrt(ln(parent_visits) / visits)`
pub fn uct_value(wins: u64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploitation_term(wins, visits) + exploration_term(parent_visits, visits, exploration_constant)
}

/// Safely calculates the win rate from wins and visits
///
/// Returns 0.0 if no visits have occurred.
pub fn win_rate(wins: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    wins as f64 / visits as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uct_value_matches_formula() {
        let value = uct_value(3, 4, 20, 0.3);
        let expected = 0.75 + 0.3 * ((20f64).ln() / 4.0).sqrt();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_exploration_constant_is_pure_win_rate() {
        assert_eq!(uct_value(2, 8, 100, 0.0), 0.25);
    }

    #[test]
    fn test_unvisited_child_is_infinitely_attractive() {
        assert_eq!(uct_value(0, 0, 10, 1.0), f64::INFINITY);
        assert_eq!(win_rate(0, 0), 0.0);
    }

    #[test]
    fn test_fewer_visits_means_larger_bonus() {
        assert!(exploration_term(50, 2, 1.0) > exploration_term(50, 10, 1.0));
    }
}
