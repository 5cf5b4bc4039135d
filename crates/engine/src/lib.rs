//! Turn orchestration - input dispatch and the end-of-turn pipeline
//!
//! The [`TurnOrchestrator`] composes the grid, the turn counters and the
//! three booster controllers, interprets input events, and drives the
//! removal -> gravity -> refill pipeline. It talks to the outside world
//! exclusively through the [`GameView`] collaborator trait; the view layer
//! renders and animates, the orchestrator owns all game state.
//!
//! # Phases
//!
//! - **Idle**: accepts input.
//! - **Animating**: a render instruction has been issued and the
//!   orchestrator waits for [`TurnOrchestrator::animation_done`]; all other
//!   input is ignored. This is the sole suspension point - no timeout
//!   guards it, an unresponsive view stalls the game.
//! - **GameOver**: terminal; only a restart mutates state again.
//!
//! The pipeline is resumable: its progress is a pending-acknowledgement
//! tag, not a retained closure, so there is exactly one pipeline in flight
//! at any time and no hidden captures of orchestrator internals.

use tile_blast_core::{
    BombController, Grid, GridSnapshot, MegaBomb, TeleportAction, TeleportController, TurnState,
};
use tile_blast_types::{EndReason, GameConfig, GravityMove, InputEvent, RefillCell, TilePos};

/// Fire-and-forget visual effect triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ImpactShake { center: TilePos, radius: i16 },
    RadialFlash { center: TilePos, radius: i16 },
}

/// Outbound surface the orchestrator drives.
///
/// `animate_removal` and `animate_board_update` are awaited: the view must
/// call [`TurnOrchestrator::animation_done`] once the animation finishes.
/// Everything else is fire-and-forget.
pub trait GameView {
    fn render_grid(&mut self, snapshot: &GridSnapshot);
    fn animate_removal(&mut self, cells: &[TilePos]);
    fn animate_board_update(&mut self, moves: &[GravityMove], created: &[RefillCell]);
    fn selection_changed(&mut self, selection: Option<TilePos>);
    fn show_mega_bomb(&mut self, pos: TilePos);
    fn play_effect(&mut self, effect: Effect);
    fn on_win(&mut self);
    fn on_lose(&mut self);
    fn on_no_moves(&mut self, reshuffles_left: u32);
    fn on_bombs_changed(&mut self, bombs_left: u32);
    fn on_teleports_changed(&mut self, teleports_left: u32);
}

/// Orchestrator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
    GameOver,
}

/// Which acknowledgement the orchestrator is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAck {
    Removal,
    BoardUpdate,
}

pub struct TurnOrchestrator {
    config: GameConfig,
    grid: Grid,
    turn: TurnState,
    teleport: TeleportController,
    bomb: BombController,
    mega: MegaBomb,
    phase: Phase,
    pending: Option<PendingAck>,
    end_notified: bool,
}

impl TurnOrchestrator {
    /// Create a fresh game from configuration and seed.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut grid = Grid::new(config.rows, config.cols, config.num_colors, seed);
        grid.random_fill();
        Self::from_parts(config, grid)
    }

    /// Create an orchestrator around a prepared grid (tests paint exact
    /// boards this way).
    pub fn from_parts(config: GameConfig, grid: Grid) -> Self {
        let turn = TurnState::new(&config);
        let teleport = TeleportController::new();
        let bomb = BombController::new(config.bomb_radius);
        let mega = MegaBomb::new(config.mega_bomb_min_group_size);
        Self {
            config,
            grid,
            turn,
            teleport,
            bomb,
            mega,
            phase: Phase::Idle,
            pending: None,
            end_notified: false,
        }
    }

    /// Emit the initial full-grid render.
    pub fn start(&mut self, view: &mut dyn GameView) {
        view.render_grid(&GridSnapshot::of(&self.grid));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn teleport_active(&self) -> bool {
        self.teleport.is_active()
    }

    pub fn bomb_active(&self) -> bool {
        self.bomb.is_active()
    }

    /// Whether input is currently accepted.
    pub fn is_interactive(&self) -> bool {
        self.phase == Phase::Idle && !self.turn.game_over()
    }

    /// Dispatch an input event from the view layer.
    pub fn handle_event(&mut self, event: InputEvent, view: &mut dyn GameView) {
        match event {
            InputEvent::TileClick { row, col } => {
                self.tile_click(TilePos::new(row, col), view);
            }
            InputEvent::ToggleTeleport => self.toggle_teleport(view),
            InputEvent::ToggleBomb => self.toggle_bomb(view),
            InputEvent::ConfirmNoMoves => self.confirm_no_moves(view),
            InputEvent::Restart => self.restart(view),
        }
    }

    /// Acknowledgement from the view layer that the issued animation has
    /// completed. Spurious acks are ignored.
    pub fn animation_done(&mut self, view: &mut dyn GameView) {
        match self.pending.take() {
            Some(PendingAck::Removal) => self.resolve_board(view),
            Some(PendingAck::BoardUpdate) => self.finish_turn(view),
            None => {}
        }
    }

    // ---- input dispatch ----

    fn tile_click(&mut self, pos: TilePos, view: &mut dyn GameView) {
        if !self.is_interactive() {
            return;
        }

        // First matching rule wins: teleport mode, bomb mode, mega-bomb
        // cell, then a normal group click.
        if self.teleport.is_active() {
            self.teleport_click(pos, view);
            return;
        }
        if self.bomb.is_active() {
            self.bomb_click(pos, view);
            return;
        }
        if self.mega.is_mega_bomb(&self.grid, pos) {
            self.mega_bomb_click(pos, view);
            return;
        }
        self.group_click(pos, view);
    }

    fn teleport_click(&mut self, pos: TilePos, view: &mut dyn GameView) {
        let Some(action) = self.teleport.handle_click(&mut self.grid, pos) else {
            return;
        };
        match action {
            TeleportAction::Select(p) => view.selection_changed(Some(p)),
            TeleportAction::Deselect(_) => view.selection_changed(None),
            TeleportAction::Reselect { to, .. } => view.selection_changed(Some(to)),
            TeleportAction::Swap { .. } => {
                // The swap has already happened logically; a failed charge
                // consumption here is absorbed, not rolled back.
                if self.turn.use_teleport() {
                    view.on_teleports_changed(self.turn.teleports_left());
                }
                view.selection_changed(None);
                // A swap changes positions, not occupancy; the pipeline
                // still runs to restore consistency.
                self.run_pipeline(Vec::new(), view);
            }
        }
    }

    fn bomb_click(&mut self, pos: TilePos, view: &mut dyn GameView) {
        let cells = self.bomb.handle_click(&self.grid, pos);
        if cells.is_empty() {
            return;
        }
        if !self.turn.use_bomb() {
            return;
        }
        self.turn.apply_bomb(cells.len());
        view.on_bombs_changed(self.turn.bombs_left());
        view.play_effect(Effect::RadialFlash {
            center: pos,
            radius: self.bomb.radius(),
        });
        self.grid.remove_group(&cells);
        self.run_pipeline(cells, view);
    }

    fn mega_bomb_click(&mut self, pos: TilePos, view: &mut dyn GameView) {
        let Some(explosion) = self.mega.explode(&mut self.grid, pos) else {
            return;
        };
        self.turn.apply_bomb(explosion.total);
        self.teleport.reset();
        self.bomb.reset();
        view.play_effect(Effect::ImpactShake {
            center: pos,
            radius: self.grid.rows().max(self.grid.cols()),
        });
        self.run_pipeline(explosion.removed, view);
    }

    fn group_click(&mut self, pos: TilePos, view: &mut dyn GameView) {
        let group = self.grid.find_group(pos);
        if group.is_empty() || !self.turn.can_remove_group(group.len()) {
            return;
        }

        self.turn.apply_group(group.len());

        let removed = if self.mega.can_create_from_size(group.len())
            && self.mega.create_from_group(&mut self.grid, &group, pos)
        {
            view.show_mega_bomb(pos);
            group.into_iter().filter(|&p| p != pos).collect()
        } else {
            self.grid.remove_group(&group);
            group
        };

        self.run_pipeline(removed, view);
    }

    fn toggle_teleport(&mut self, view: &mut dyn GameView) {
        if !self.is_interactive() || self.turn.teleports_left() == 0 {
            return;
        }
        if !self.teleport.is_active() {
            // Mutual exclusion: activating one booster deactivates the other.
            self.bomb.reset();
        }
        let had_selection = self.teleport.selection().is_some();
        self.teleport.toggle();
        if had_selection {
            view.selection_changed(None);
        }
    }

    fn toggle_bomb(&mut self, view: &mut dyn GameView) {
        if !self.is_interactive() || self.turn.bombs_left() == 0 {
            return;
        }
        if !self.bomb.is_active() {
            let had_selection = self.teleport.selection().is_some();
            self.teleport.reset();
            if had_selection {
                view.selection_changed(None);
            }
        }
        self.bomb.toggle();
    }

    fn confirm_no_moves(&mut self, view: &mut dyn GameView) {
        if !self.is_interactive() {
            return;
        }
        self.reshuffle_or_lose(view);
    }

    fn restart(&mut self, view: &mut dyn GameView) {
        // Wholesale replacement; the random sequence continues from the
        // previous grid so games stay reproducible from the original seed.
        let seed = self.grid.rng_state();
        let mut grid = Grid::new(
            self.config.rows,
            self.config.cols,
            self.config.num_colors,
            seed,
        );
        grid.random_fill();
        self.grid = grid;
        self.turn = TurnState::new(&self.config);
        self.teleport.reset();
        self.bomb.reset();
        self.phase = Phase::Idle;
        self.pending = None;
        self.end_notified = false;
        view.render_grid(&GridSnapshot::of(&self.grid));
    }

    // ---- end-of-turn pipeline ----

    /// Stage (a): enter Animating; animate the removal if there is one,
    /// otherwise go straight to gravity and refill.
    fn run_pipeline(&mut self, removed: Vec<TilePos>, view: &mut dyn GameView) {
        self.phase = Phase::Animating;
        if removed.is_empty() {
            self.resolve_board(view);
        } else {
            view.animate_removal(&removed);
            self.pending = Some(PendingAck::Removal);
        }
    }

    /// Stages (b)-(d): gravity, refill, hand both lists to the view and
    /// await the acknowledgement. Issued even when both lists are empty so
    /// every trigger path has the same pipeline shape.
    fn resolve_board(&mut self, view: &mut dyn GameView) {
        let moves = self.grid.apply_gravity();
        let created = self.grid.refill_empty_cells();
        view.animate_board_update(&moves, &created);
        self.pending = Some(PendingAck::BoardUpdate);
    }

    /// Stages (e)-(g): selection cleanup, move-availability check, and
    /// terminal-state evaluation.
    fn finish_turn(&mut self, view: &mut dyn GameView) {
        if self.teleport.selection().is_some() {
            self.teleport.reset();
            view.selection_changed(None);
        }

        self.phase = Phase::Idle;

        if !self.turn.game_over() && !self.grid.has_any_moves(self.turn.min_group_size()) {
            if self.turn.reshuffles_left() > 0 {
                // A reshuffle is available: ask the player and wait for the
                // confirm event before consuming the charge.
                view.on_no_moves(self.turn.reshuffles_left());
            } else {
                self.turn.force_lose();
            }
        }

        self.evaluate_terminal(view);
    }

    /// Step (f) reshuffle branch: consume charges until a move exists or
    /// none remain. Bounded because each iteration either finds a move or
    /// spends a finite charge.
    fn reshuffle_or_lose(&mut self, view: &mut dyn GameView) {
        loop {
            if self.grid.has_any_moves(self.turn.min_group_size()) {
                break;
            }
            if self.turn.use_reshuffle() {
                let seed = self.grid.rng_state();
                let mut grid = Grid::new(
                    self.config.rows,
                    self.config.cols,
                    self.config.num_colors,
                    seed,
                );
                grid.random_fill();
                self.grid = grid;
                self.teleport.reset();
                self.bomb.reset();
                view.render_grid(&GridSnapshot::of(&self.grid));
            } else {
                self.turn.force_lose();
                break;
            }
        }
        self.evaluate_terminal(view);
    }

    /// Step (g): invoke the matching end callback exactly once.
    fn evaluate_terminal(&mut self, view: &mut dyn GameView) {
        if !self.turn.game_over() {
            return;
        }
        self.phase = Phase::GameOver;
        if self.end_notified {
            return;
        }
        self.end_notified = true;
        match self.turn.end_reason() {
            Some(EndReason::Win) => view.on_win(),
            Some(EndReason::Lose) | None => view.on_lose(),
        }
    }
}
