//! Turn state module - score, moves, booster charges and end evaluation
//!
//! Pure counters with no grid awareness. All mutators are guarded: once the
//! game is over, or when a charge is exhausted, they leave the state
//! untouched and report failure. Counters never go negative and score is
//! monotone non-decreasing.
//!
//! End evaluation gives win priority over lose: reaching the target score
//! on the final move is a win even though no moves remain.

use tile_blast_types::{EndReason, GameConfig};

/// Counters for one game; created together with the grid and replaced
/// wholesale on restart, never partially reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    score: u32,
    moves_left: u32,
    target_score: u32,
    reshuffles_left: u32,
    bombs_left: u32,
    teleports_left: u32,
    min_group_size: usize,
    score_per_tile: u32,
    game_over: bool,
    end_reason: Option<EndReason>,
}

impl TurnState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            moves_left: config.start_moves,
            target_score: config.target_score,
            reshuffles_left: config.reshuffle_limit,
            bombs_left: config.bomb_limit,
            teleports_left: config.teleport_limit,
            min_group_size: config.min_group_size,
            score_per_tile: config.score_per_tile,
            game_over: false,
            end_reason: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn reshuffles_left(&self) -> u32 {
        self.reshuffles_left
    }

    pub fn bombs_left(&self) -> u32 {
        self.bombs_left
    }

    pub fn teleports_left(&self) -> u32 {
        self.teleports_left
    }

    pub fn min_group_size(&self) -> usize {
        self.min_group_size
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Whether a group of `size` tiles may be removed right now.
    pub fn can_remove_group(&self, size: usize) -> bool {
        !self.game_over && size >= self.min_group_size
    }

    /// Score a removed group and consume one move, then evaluate the end
    /// condition. Returns the score gained, 0 if the removal was not
    /// allowed.
    pub fn apply_group(&mut self, size: usize) -> u32 {
        if !self.can_remove_group(size) {
            return 0;
        }

        let gained = (size as u32) * self.score_per_tile;
        self.score += gained;
        self.moves_left = self.moves_left.saturating_sub(1);
        self.evaluate_end();
        gained
    }

    /// Score tiles removed by a bomb or mega-bomb explosion without
    /// consuming a move. Returns the score gained.
    pub fn apply_bomb(&mut self, count: usize) -> u32 {
        if self.game_over || count == 0 {
            return 0;
        }

        let gained = (count as u32) * self.score_per_tile;
        self.score += gained;
        self.evaluate_end();
        gained
    }

    /// Consume one reshuffle charge. Returns false and mutates nothing if
    /// no charge remains or the game is over.
    pub fn use_reshuffle(&mut self) -> bool {
        if self.game_over || self.reshuffles_left == 0 {
            return false;
        }
        self.reshuffles_left -= 1;
        true
    }

    /// Consume one bomb charge. Same gating as [`TurnState::use_reshuffle`].
    pub fn use_bomb(&mut self) -> bool {
        if self.game_over || self.bombs_left == 0 {
            return false;
        }
        self.bombs_left -= 1;
        true
    }

    /// Consume one teleport charge; called only once a swap has completed.
    pub fn use_teleport(&mut self) -> bool {
        if self.game_over || self.teleports_left == 0 {
            return false;
        }
        self.teleports_left -= 1;
        true
    }

    /// Force a loss (no moves remain and no reshuffles are left).
    pub fn force_lose(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.end_reason = Some(EndReason::Lose);
    }

    // Win takes priority over lose: hitting the target on the last move
    // still wins.
    fn evaluate_end(&mut self) {
        if self.game_over {
            return;
        }
        if self.score >= self.target_score {
            self.game_over = true;
            self.end_reason = Some(EndReason::Win);
        } else if self.moves_left == 0 {
            self.game_over = true;
            self.end_reason = Some(EndReason::Lose);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_blast_types::GameConfig;

    fn state() -> TurnState {
        TurnState::new(&GameConfig::default())
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_left(), 25);
        assert_eq!(s.reshuffles_left(), 3);
        assert_eq!(s.bombs_left(), 3);
        assert_eq!(s.teleports_left(), 3);
        assert!(!s.game_over());
        assert_eq!(s.end_reason(), None);
    }

    #[test]
    fn test_can_remove_group_threshold() {
        let s = state();
        assert!(!s.can_remove_group(0));
        assert!(!s.can_remove_group(1));
        assert!(s.can_remove_group(2));
        assert!(s.can_remove_group(81));
    }

    #[test]
    fn test_can_remove_group_after_game_over() {
        let mut s = state();
        s.force_lose();
        assert!(!s.can_remove_group(5));
    }

    #[test]
    fn test_apply_group_scores_and_consumes_move() {
        let mut s = state();
        let gained = s.apply_group(3);
        assert_eq!(gained, 30);
        assert_eq!(s.score(), 30);
        assert_eq!(s.moves_left(), 24);
        assert!(!s.game_over());
    }

    #[test]
    fn test_apply_group_rejects_small_groups() {
        let mut s = state();
        assert_eq!(s.apply_group(1), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_left(), 25);
    }

    #[test]
    fn test_win_priority_on_final_move() {
        let mut config = GameConfig::default();
        config.start_moves = 1;
        config.target_score = 20;
        let mut s = TurnState::new(&config);

        // Last move reaches the target: win, not lose
        assert_eq!(s.apply_group(2), 20);
        assert!(s.game_over());
        assert_eq!(s.end_reason(), Some(EndReason::Win));
        assert_eq!(s.moves_left(), 0);
    }

    #[test]
    fn test_lose_when_moves_exhausted() {
        let mut config = GameConfig::default();
        config.start_moves = 1;
        let mut s = TurnState::new(&config);

        s.apply_group(2);
        assert!(s.game_over());
        assert_eq!(s.end_reason(), Some(EndReason::Lose));
    }

    #[test]
    fn test_apply_bomb_keeps_moves() {
        let mut s = state();
        let gained = s.apply_bomb(9);
        assert_eq!(gained, 90);
        assert_eq!(s.moves_left(), 25);
    }

    #[test]
    fn test_apply_bomb_can_win() {
        let mut config = GameConfig::default();
        config.target_score = 100;
        let mut s = TurnState::new(&config);
        s.apply_bomb(10);
        assert!(s.game_over());
        assert_eq!(s.end_reason(), Some(EndReason::Win));
    }

    #[test]
    fn test_apply_bomb_noop_cases() {
        let mut s = state();
        assert_eq!(s.apply_bomb(0), 0);
        s.force_lose();
        assert_eq!(s.apply_bomb(5), 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_charges_never_negative() {
        let mut s = state();
        for _ in 0..3 {
            assert!(s.use_bomb());
        }
        assert_eq!(s.bombs_left(), 0);
        assert!(!s.use_bomb());
        assert_eq!(s.bombs_left(), 0);

        for _ in 0..3 {
            assert!(s.use_teleport());
        }
        assert!(!s.use_teleport());
        assert_eq!(s.teleports_left(), 0);

        for _ in 0..3 {
            assert!(s.use_reshuffle());
        }
        assert!(!s.use_reshuffle());
        assert_eq!(s.reshuffles_left(), 0);
    }

    #[test]
    fn test_charges_blocked_after_game_over() {
        let mut s = state();
        s.force_lose();
        assert!(!s.use_bomb());
        assert!(!s.use_teleport());
        assert!(!s.use_reshuffle());
        assert_eq!(s.bombs_left(), 3);
    }

    #[test]
    fn test_force_lose_does_not_override_win() {
        let mut config = GameConfig::default();
        config.target_score = 10;
        let mut s = TurnState::new(&config);
        s.apply_group(2);
        assert_eq!(s.end_reason(), Some(EndReason::Win));
        s.force_lose();
        assert_eq!(s.end_reason(), Some(EndReason::Win));
    }

    #[test]
    fn test_score_monotone() {
        let mut s = state();
        let mut last = 0;
        for i in 0..10 {
            s.apply_group(2 + i % 3);
            assert!(s.score() >= last);
            last = s.score();
        }
    }
}
