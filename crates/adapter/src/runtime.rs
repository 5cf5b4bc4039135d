//! Adapter runtime integration.
//!
//! Bridges the synchronous orchestrator with an async line transport. The
//! [`ChannelView`] serializes every view callback onto an unbounded channel
//! of JSON lines; [`Session`] parses inbound lines and feeds them into the
//! orchestrator. [`run_session`] wraps both in a receive loop.

use tokio::sync::mpsc;

use tile_blast_core::GridSnapshot;
use tile_blast_engine::{Effect, GameView, TurnOrchestrator};
use tile_blast_types::{GameConfig, GravityMove, InputEvent, RefillCell, TilePos};

use crate::protocol::{
    self, parse_message, BoardUpdateMessage, BoardUpdateType, CellPos, ChargeKind, ChargesMessage,
    ChargesType, CountersMessage, CountersType, EffectKind, EffectMessage, EffectType,
    GameOverMessage, GameOverType, GridMessage, GridType, MegaBombMessage,
    MegaBombType, NoMovesMessage, NoMovesType, ParsedMessage, RemovalMessage, RemovalType,
    SelectionMessage, SelectionType,
};

/// View implementation that serializes callbacks to JSON lines.
pub struct ChannelView {
    tx: mpsc::UnboundedSender<String>,
    seq: u64,
}

impl ChannelView {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx, seq: 0 }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn send<T: serde::Serialize>(&mut self, msg: &T) {
        match serde_json::to_string(msg) {
            Ok(line) => {
                // A dropped receiver just means the view went away.
                let _ = self.tx.send(line);
            }
            Err(e) => eprintln!("[adapter] failed to serialize outbound message: {e}"),
        }
    }
}

impl GameView for ChannelView {
    fn render_grid(&mut self, snapshot: &GridSnapshot) {
        let msg = GridMessage {
            msg_type: GridType::Grid,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            rows: snapshot.rows,
            cols: snapshot.cols,
            cells: snapshot.cells.iter().map(|c| c.map(|t| t.color.0)).collect(),
        };
        self.send(&msg);
    }

    fn animate_removal(&mut self, cells: &[TilePos]) {
        let msg = RemovalMessage {
            msg_type: RemovalType::Removal,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            cells: cells.iter().copied().map(CellPos::from).collect(),
        };
        self.send(&msg);
    }

    fn animate_board_update(&mut self, moves: &[GravityMove], created: &[RefillCell]) {
        let msg = BoardUpdateMessage {
            msg_type: BoardUpdateType::BoardUpdate,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            moves: moves.iter().copied().map(Into::into).collect(),
            created: created.iter().copied().map(Into::into).collect(),
        };
        self.send(&msg);
    }

    fn selection_changed(&mut self, selection: Option<TilePos>) {
        let msg = SelectionMessage {
            msg_type: SelectionType::Selection,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            selected: selection.map(CellPos::from),
        };
        self.send(&msg);
    }

    fn show_mega_bomb(&mut self, pos: TilePos) {
        let msg = MegaBombMessage {
            msg_type: MegaBombType::MegaBomb,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            pos: pos.into(),
        };
        self.send(&msg);
    }

    fn play_effect(&mut self, effect: Effect) {
        let (kind, center, radius) = match effect {
            Effect::RadialFlash { center, radius } => (EffectKind::RadialFlash, center, radius),
            Effect::ImpactShake { center, radius } => (EffectKind::ImpactShake, center, radius),
        };
        let msg = EffectMessage {
            msg_type: EffectType::Effect,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            kind,
            center: center.into(),
            radius,
        };
        self.send(&msg);
    }

    fn on_win(&mut self) {
        self.game_over(tile_blast_types::EndReason::Win);
    }

    fn on_lose(&mut self) {
        self.game_over(tile_blast_types::EndReason::Lose);
    }

    fn on_no_moves(&mut self, reshuffles_left: u32) {
        let msg = NoMovesMessage {
            msg_type: NoMovesType::NoMoves,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            reshuffles_left,
        };
        self.send(&msg);
    }

    fn on_bombs_changed(&mut self, bombs_left: u32) {
        self.charges(ChargeKind::Bombs, bombs_left);
    }

    fn on_teleports_changed(&mut self, teleports_left: u32) {
        self.charges(ChargeKind::Teleports, teleports_left);
    }
}

impl ChannelView {
    fn game_over(&mut self, reason: tile_blast_types::EndReason) {
        let msg = GameOverMessage {
            msg_type: GameOverType::GameOver,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            reason: reason.into(),
        };
        self.send(&msg);
    }

    fn charges(&mut self, kind: ChargeKind, left: u32) {
        let msg = ChargesMessage {
            msg_type: ChargesType::Charges,
            seq: self.next_seq(),
            ts: protocol::current_timestamp_ms(),
            kind,
            left,
        };
        self.send(&msg);
    }
}

/// One game session: orchestrator plus its serializing view.
pub struct Session {
    orchestrator: TurnOrchestrator,
    view: ChannelView,
}

impl Session {
    pub fn new(config: GameConfig, seed: u32, out_tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            orchestrator: TurnOrchestrator::new(config, seed),
            view: ChannelView::new(out_tx),
        }
    }

    /// Emit the initial grid render and counter snapshot.
    pub fn start(&mut self) {
        self.orchestrator.start(&mut self.view);
        self.send_counters();
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    /// Handle one inbound JSON line. Malformed lines are logged and
    /// dropped; the session keeps running.
    pub fn handle_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match parse_message(line) {
            Ok(ParsedMessage::Click(msg)) => {
                self.orchestrator.handle_event(
                    InputEvent::TileClick {
                        row: msg.row,
                        col: msg.col,
                    },
                    &mut self.view,
                );
            }
            Ok(ParsedMessage::Input(msg)) => {
                self.orchestrator.handle_event(msg.action.0, &mut self.view);
            }
            Ok(ParsedMessage::Ack(_)) => {
                self.orchestrator.animation_done(&mut self.view);
            }
            Ok(ParsedMessage::Unknown(msg)) => {
                eprintln!("[adapter] ignoring unknown message type (seq {})", msg.seq);
                return;
            }
            Err(e) => {
                eprintln!("[adapter] dropping malformed line: {e}");
                return;
            }
        }
        self.send_counters();
    }

    // Counter broadcast after every handled message keeps the view's HUD
    // current without per-field change tracking.
    fn send_counters(&mut self) {
        let turn = self.orchestrator.turn();
        let msg = CountersMessage {
            msg_type: CountersType::Counters,
            seq: self.view.next_seq(),
            ts: protocol::current_timestamp_ms(),
            score: turn.score(),
            moves_left: turn.moves_left(),
            bombs_left: turn.bombs_left(),
            teleports_left: turn.teleports_left(),
        };
        self.view.send(&msg);
    }
}

/// Run a session over channel transports until the inbound side closes.
pub async fn run_session(
    config: GameConfig,
    seed: u32,
    mut in_rx: mpsc::Receiver<String>,
    out_tx: mpsc::UnboundedSender<String>,
) -> anyhow::Result<()> {
    let mut session = Session::new(config, seed, out_tx);
    session.start();
    while let Some(line) = in_rx.recv().await {
        session.handle_line(&line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_blast_engine::Phase;

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        while let Ok(line) = rx.try_recv() {
            out.push(serde_json::from_str(&line).unwrap());
        }
        out
    }

    fn types_of(messages: &[serde_json::Value]) -> Vec<String> {
        messages
            .iter()
            .map(|m| m["type"].as_str().unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn test_start_emits_grid_and_counters() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(GameConfig::default(), 7, tx);
        session.start();

        let msgs = drain(&mut rx);
        assert_eq!(types_of(&msgs), vec!["grid", "counters"]);
        assert_eq!(msgs[0]["rows"], 9);
        assert_eq!(msgs[0]["cells"].as_array().unwrap().len(), 81);
        assert_eq!(msgs[1]["score"], 0);
        assert_eq!(msgs[1]["moves_left"], 25);
    }

    #[test]
    fn test_seq_is_monotonic() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(GameConfig::default(), 7, tx);
        session.start();
        session.handle_line(r#"{"type":"input","seq":1,"ts":0,"action":"toggleBomb"}"#);

        let msgs = drain(&mut rx);
        let seqs: Vec<u64> = msgs.iter().map(|m| m["seq"].as_u64().unwrap()).collect();
        for pair in seqs.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_malformed_line_keeps_session_alive() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(GameConfig::default(), 7, tx);
        session.start();
        drain(&mut rx);

        session.handle_line("{broken json");
        session.handle_line(r#"{"type":"telemetry","seq":4}"#);
        assert!(drain(&mut rx).is_empty());

        // A valid line still works afterwards
        session.handle_line(r#"{"type":"input","seq":5,"ts":0,"action":"toggleBomb"}"#);
        let msgs = drain(&mut rx);
        assert_eq!(types_of(&msgs), vec!["counters"]);
    }

    #[test]
    fn test_click_then_acks_complete_turn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new(GameConfig::default(), 7, tx);
        session.start();
        drain(&mut rx);

        // Click every cell until some group is removed; seed 7 is a full
        // random board so a pair exists somewhere.
        'outer: for row in 0..9 {
            for col in 0..9 {
                let line = format!(r#"{{"type":"click","seq":1,"ts":0,"row":{row},"col":{col}}}"#);
                session.handle_line(&line);
                if session.orchestrator().phase() == Phase::Animating {
                    break 'outer;
                }
            }
        }
        assert_eq!(session.orchestrator().phase(), Phase::Animating);

        let msgs = drain(&mut rx);
        assert!(types_of(&msgs).contains(&"removal".to_string()));

        session.handle_line(r#"{"type":"ack","seq":2,"ts":0}"#);
        let msgs = drain(&mut rx);
        assert!(types_of(&msgs).contains(&"board_update".to_string()));
        assert_eq!(session.orchestrator().phase(), Phase::Animating);

        session.handle_line(r#"{"type":"ack","seq":3,"ts":0}"#);
        assert_ne!(session.orchestrator().phase(), Phase::Animating);
    }

    #[tokio::test]
    async fn test_run_session_ends_when_input_closes() {
        let (in_tx, in_rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run_session(GameConfig::default(), 7, in_rx, out_tx));

        in_tx
            .send(r#"{"type":"input","seq":1,"ts":0,"action":"toggleBomb"}"#.to_string())
            .await
            .unwrap();
        drop(in_tx);

        handle.await.unwrap().unwrap();
        let msgs = drain(&mut out_rx);
        assert!(types_of(&msgs).contains(&"grid".to_string()));
        assert!(types_of(&msgs).contains(&"counters".to_string()));
    }
}
