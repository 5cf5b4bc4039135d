//! Protocol module - JSON message types for the view adapter
//!
//! Implements the line-delimited JSON protocol between the game session
//! and an external view layer. All messages have: type, seq (sequence
//! number), ts (timestamp in ms).

use serde::{Deserialize, Serialize};

use tile_blast_types::{EndReason, GravityMove, InputEvent, RefillCell, TilePos};

// ============== View -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickType {
    #[serde(rename = "click")]
    Click,
}

impl Default for ClickType {
    fn default() -> Self {
        Self::Click
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    #[serde(rename = "input")]
    Input,
}

impl Default for InputType {
    fn default() -> Self {
        Self::Input
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

impl Default for AckType {
    fn default() -> Self {
        Self::Ack
    }
}

/// Tile click with raw view coordinates; the core bounds-checks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ClickType,
    pub seq: u64,
    pub ts: u64,
    pub row: i16,
    pub col: i16,
}

/// Non-positional input (booster toggles, dialog confirmation, restart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: InputType,
    pub seq: u64,
    pub ts: u64,
    pub action: ActionName,
}

/// Input action on the wire; a thin newtype that defers naming to
/// [`InputEvent::from_str`] / [`InputEvent::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionName(pub InputEvent);

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        InputEvent::from_str(s)
            .map(ActionName)
            .ok_or_else(|| serde::de::Error::custom("unknown input action"))
    }
}

impl Serialize for ActionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

/// Acknowledgement that the view finished the animation it was asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
}

// ============== Game -> View Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridType {
    #[serde(rename = "grid")]
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalType {
    #[serde(rename = "removal")]
    Removal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardUpdateType {
    #[serde(rename = "board_update")]
    BoardUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionType {
    #[serde(rename = "selection")]
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MegaBombType {
    #[serde(rename = "mega_bomb")]
    MegaBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    #[serde(rename = "effect")]
    Effect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountersType {
    #[serde(rename = "counters")]
    Counters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoMovesType {
    #[serde(rename = "no_moves")]
    NoMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverType {
    #[serde(rename = "game_over")]
    GameOver,
}

/// A (row, col) pair on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub row: i16,
    pub col: i16,
}

impl From<TilePos> for CellPos {
    fn from(value: TilePos) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

/// Full grid snapshot, cells row-major; null = empty, otherwise the
/// palette index (255 marks a mega bomb).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMessage {
    #[serde(rename = "type")]
    pub msg_type: GridType,
    pub seq: u64,
    pub ts: u64,
    pub rows: i16,
    pub cols: i16,
    pub cells: Vec<Option<u8>>,
}

/// Removal animation instruction. The view must reply with an ack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalMessage {
    #[serde(rename = "type")]
    pub msg_type: RemovalType,
    pub seq: u64,
    pub ts: u64,
    pub cells: Vec<CellPos>,
}

/// Gravity moves plus refilled cells. The view must reply with an ack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardUpdateMessage {
    #[serde(rename = "type")]
    pub msg_type: BoardUpdateType,
    pub seq: u64,
    pub ts: u64,
    pub moves: Vec<MoveRecord>,
    pub created: Vec<CreatedRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: CellPos,
    pub to: CellPos,
    pub color: u8,
}

impl From<GravityMove> for MoveRecord {
    fn from(value: GravityMove) -> Self {
        Self {
            from: value.from.into(),
            to: value.to.into(),
            color: value.color.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub pos: CellPos,
    pub color: u8,
}

impl From<RefillCell> for CreatedRecord {
    fn from(value: RefillCell) -> Self {
        Self {
            pos: value.pos.into(),
            color: value.color.0,
        }
    }
}

/// Teleport selection highlight; null clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionMessage {
    #[serde(rename = "type")]
    pub msg_type: SelectionType,
    pub seq: u64,
    pub ts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<CellPos>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MegaBombMessage {
    #[serde(rename = "type")]
    pub msg_type: MegaBombType,
    pub seq: u64,
    pub ts: u64,
    pub pos: CellPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    RadialFlash,
    ImpactShake,
}

impl<'de> Deserialize<'de> for EffectKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("radialFlash") {
            Ok(Self::RadialFlash)
        } else if s.eq_ignore_ascii_case("impactShake") {
            Ok(Self::ImpactShake)
        } else {
            Err(serde::de::Error::custom("unknown effect kind"))
        }
    }
}

impl Serialize for EffectKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            EffectKind::RadialFlash => serializer.serialize_str("radialFlash"),
            EffectKind::ImpactShake => serializer.serialize_str("impactShake"),
        }
    }
}

/// Fire-and-forget effect trigger; carries no game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectMessage {
    #[serde(rename = "type")]
    pub msg_type: EffectType,
    pub seq: u64,
    pub ts: u64,
    pub kind: EffectKind,
    pub center: CellPos,
    pub radius: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargesType {
    #[serde(rename = "charges")]
    Charges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeKind {
    Bombs,
    Teleports,
}

impl<'de> Deserialize<'de> for ChargeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("bombs") {
            Ok(Self::Bombs)
        } else if s.eq_ignore_ascii_case("teleports") {
            Ok(Self::Teleports)
        } else {
            Err(serde::de::Error::custom("unknown charge kind"))
        }
    }
}

impl Serialize for ChargeKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ChargeKind::Bombs => serializer.serialize_str("bombs"),
            ChargeKind::Teleports => serializer.serialize_str("teleports"),
        }
    }
}

/// A booster charge was consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargesMessage {
    #[serde(rename = "type")]
    pub msg_type: ChargesType,
    pub seq: u64,
    pub ts: u64,
    pub kind: ChargeKind,
    pub left: u32,
}

/// Full counter snapshot, broadcast after every handled input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountersMessage {
    #[serde(rename = "type")]
    pub msg_type: CountersType,
    pub seq: u64,
    pub ts: u64,
    pub score: u32,
    #[serde(rename = "moves_left")]
    pub moves_left: u32,
    #[serde(rename = "bombs_left")]
    pub bombs_left: u32,
    #[serde(rename = "teleports_left")]
    pub teleports_left: u32,
}

/// No-moves dialog prompt; the view answers with a confirmNoMoves input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoMovesMessage {
    #[serde(rename = "type")]
    pub msg_type: NoMovesType,
    pub seq: u64,
    pub ts: u64,
    #[serde(rename = "reshuffles_left")]
    pub reshuffles_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReasonWire {
    Win,
    Lose,
}

impl From<EndReason> for EndReasonWire {
    fn from(value: EndReason) -> Self {
        match value {
            EndReason::Win => Self::Win,
            EndReason::Lose => Self::Lose,
        }
    }
}

impl<'de> Deserialize<'de> for EndReasonWire {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("win") {
            Ok(Self::Win)
        } else if s.eq_ignore_ascii_case("lose") {
            Ok(Self::Lose)
        } else {
            Err(serde::de::Error::custom("invalid end reason"))
        }
    }
}

impl Serialize for EndReasonWire {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            EndReasonWire::Win => serializer.serialize_str("win"),
            EndReasonWire::Lose => serializer.serialize_str("lose"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOverMessage {
    #[serde(rename = "type")]
    pub msg_type: GameOverType,
    pub seq: u64,
    pub ts: u64,
    pub reason: EndReasonWire,
}

// ============== Message Parsing ==============

/// Parse a JSON line from the view.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "click")]
        Click(ClickMessage),
        #[serde(rename = "input")]
        Input(InputMessage),
        #[serde(rename = "ack")]
        Ack(AckMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Click(m)) => Ok(ParsedMessage::Click(m)),
        Ok(InboundMessage::Input(m)) => Ok(ParsedMessage::Input(m)),
        Ok(InboundMessage::Ack(m)) => Ok(ParsedMessage::Ack(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "click" && msg_type != "input" && msg_type != "ack" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Click(ClickMessage),
    Input(InputMessage),
    Ack(AckMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

// ============== Utility Functions ==============

/// Create a click message
pub fn create_click(seq: u64, row: i16, col: i16) -> ClickMessage {
    ClickMessage {
        msg_type: ClickType::Click,
        seq,
        ts: current_timestamp_ms(),
        row,
        col,
    }
}

/// Create an input message
pub fn create_input(seq: u64, action: InputEvent) -> InputMessage {
    InputMessage {
        msg_type: InputType::Input,
        seq,
        ts: current_timestamp_ms(),
        action: ActionName(action),
    }
}

/// Create an animation acknowledgement
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
