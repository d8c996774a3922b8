//! Protocol constants
//!
//! Command identifiers and the byte layout of request and response frames.

// ============================================================================
// Frame Layout
// ============================================================================

/// Offset of the command id word.
pub const POS_COMMAND: usize = 0;
/// Offset of the sequence number word.
pub const POS_SEQUENCE: usize = 2;
/// Offset of the payload length word.
pub const POS_LENGTH: usize = 4;
/// Offset of the first payload byte (the status word in responses).
pub const POS_STATUS: usize = 6;
/// Offset of the first response field after the status word.
pub const POS_DATA: usize = 8;

/// Size of the frame header: command id, sequence number, payload length.
pub const HEADER_SIZE: usize = 6;
/// Size of the trailing checksum.
pub const CHECKSUM_SIZE: usize = 2;
/// Size of the status word that opens every response payload.
pub const STATUS_SIZE: usize = 2;

/// Status word of a successful response.
pub const STATUS_OK: u16 = 0;

// ============================================================================
// Session Defaults
// ============================================================================

/// Number of bytes scanned for a matching response header before giving up.
pub const DEFAULT_RESYNC_ATTEMPTS: u32 = 2000;
/// Pause before each header read, giving the device time to respond.
pub const DEFAULT_RESYNC_DELAY_MS: u64 = 3;
/// Largest response payload accepted before the payload is read.
pub const DEFAULT_MAX_RESPONSE_PAYLOAD: u16 = 8192;
/// Default serial baud rate of the display.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

// ============================================================================
// Command Identifiers
// ============================================================================

/// Command identifiers understood by the display.
///
/// The high byte groups commands by function (layer, image, text, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CommandId {
    // Layer
    SetLayerEnable = 0x3131,
    SetLayerOriginAndSize = 0x3132,
    SetLayerBackColor = 0x3133,
    SetLayerTransparency = 0x3134,
    LayerClear = 0x3135,
    LayerMove = 0x3136,
    LayerWriteRawPixels = 0x3137,
    ComposeLayersToPage = 0x3138,
    PageToScreen = 0x3139,
    PartialComposeLayersToScreen = 0x3141,
    // Image
    ImageLoad = 0x3231,
    ImageRelease = 0x3232,
    ImageWrite = 0x3233,
    ImageDelete = 0x3234,
    ImageMove = 0x3235,
    ImageListLoad = 0x3236,
    ImageListRelease = 0x3237,
    ImageListWrite = 0x3238,
    ImageListReplace = 0x3239,
    ImageListDelete = 0x3240,
    AnimationPlay = 0x3241,
    AnimationStop = 0x3242,
    AnimationContinue = 0x3243,
    AnimationDelete = 0x3244,
    // Text
    FontLoad = 0x3331,
    FontRelease = 0x3332,
    SetFontPadding = 0x3333,
    StringWrite = 0x3334,
    StringReplace = 0x3335,
    StringDelete = 0x3336,
    CharacterWrite = 0x3337,
    CharacterReplace = 0x3338,
    CharacterDelete = 0x3339,
    TextWindowCreate = 0x3341,
    TextWindowSetInsertionPoint = 0x3342,
    TextWindowInsertText = 0x3343,
    TextWindowDelete = 0x3344,
    // Graph
    LineGraphCreateWindow = 0x3431,
    LineGraphInsertPoints = 0x3432,
    LineGraphMove = 0x3433,
    LineGraphDeleteWindow = 0x3434,
    BarGraphCreateWindow = 0x3435,
    BarGraphInsertStacks = 0x3436,
    BarGraphRemoveStacks = 0x3437,
    BarGraphDeleteWindow = 0x3438,
    // Touch
    TouchMapRectangle = 0x3531,
    TouchMapCircle = 0x3532,
    TouchMapDelete = 0x3533,
    TouchMapClear = 0x3534,
    // Information
    SystemInfo = 0x3631,
    // Configuration
    GetMaxBackLightBrightness = 0x3731,
    GetBackLightBrightness = 0x3732,
    SetBackLightBrightness = 0x3733,
    // Other
    Reset = 0x3831,
    EventMessage = 0x3832,
    TestEcho = 0x3931,
    // Flash
    FlashWriteEnable = 0x4031,
    FlashImage = 0x4032,
    FlashData = 0x4033,
    FlashDelete = 0x4034,
    FlashDeleteAll = 0x4035,
}

impl CommandId {
    /// All command identifiers.
    pub const ALL: [CommandId; 61] = [
        CommandId::SetLayerEnable,
        CommandId::SetLayerOriginAndSize,
        CommandId::SetLayerBackColor,
        CommandId::SetLayerTransparency,
        CommandId::LayerClear,
        CommandId::LayerMove,
        CommandId::LayerWriteRawPixels,
        CommandId::ComposeLayersToPage,
        CommandId::PageToScreen,
        CommandId::PartialComposeLayersToScreen,
        CommandId::ImageLoad,
        CommandId::ImageRelease,
        CommandId::ImageWrite,
        CommandId::ImageDelete,
        CommandId::ImageMove,
        CommandId::ImageListLoad,
        CommandId::ImageListRelease,
        CommandId::ImageListWrite,
        CommandId::ImageListReplace,
        CommandId::ImageListDelete,
        CommandId::AnimationPlay,
        CommandId::AnimationStop,
        CommandId::AnimationContinue,
        CommandId::AnimationDelete,
        CommandId::FontLoad,
        CommandId::FontRelease,
        CommandId::SetFontPadding,
        CommandId::StringWrite,
        CommandId::StringReplace,
        CommandId::StringDelete,
        CommandId::CharacterWrite,
        CommandId::CharacterReplace,
        CommandId::CharacterDelete,
        CommandId::TextWindowCreate,
        CommandId::TextWindowSetInsertionPoint,
        CommandId::TextWindowInsertText,
        CommandId::TextWindowDelete,
        CommandId::LineGraphCreateWindow,
        CommandId::LineGraphInsertPoints,
        CommandId::LineGraphMove,
        CommandId::LineGraphDeleteWindow,
        CommandId::BarGraphCreateWindow,
        CommandId::BarGraphInsertStacks,
        CommandId::BarGraphRemoveStacks,
        CommandId::BarGraphDeleteWindow,
        CommandId::TouchMapRectangle,
        CommandId::TouchMapCircle,
        CommandId::TouchMapDelete,
        CommandId::TouchMapClear,
        CommandId::SystemInfo,
        CommandId::GetMaxBackLightBrightness,
        CommandId::GetBackLightBrightness,
        CommandId::SetBackLightBrightness,
        CommandId::Reset,
        CommandId::EventMessage,
        CommandId::TestEcho,
        CommandId::FlashWriteEnable,
        CommandId::FlashImage,
        CommandId::FlashData,
        CommandId::FlashDelete,
        CommandId::FlashDeleteAll,
    ];

    /// Raw wire value of this command.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a command by its wire value.
    pub fn from_code(code: u16) -> Option<CommandId> {
        CommandId::ALL.iter().copied().find(|id| id.code() == code)
    }
}

/// Command name and code for log messages; unknown codes are shown in hex.
pub(crate) fn describe_command(code: u16) -> String {
    match CommandId::from_code(code) {
        Some(id) => id.to_string(),
        None => format!("0x{:04X}", code),
    }
}

impl From<CommandId> for u16 {
    fn from(id: CommandId) -> Self {
        id.code()
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(CommandId::SetLayerEnable.code(), 0x3131);
        assert_eq!(CommandId::PartialComposeLayersToScreen.code(), 0x3141);
        assert_eq!(CommandId::SystemInfo.code(), 0x3631);
        assert_eq!(u16::from(CommandId::TestEcho), 0x3931);
    }

    #[test]
    fn test_from_code() {
        for id in CommandId::ALL {
            assert_eq!(CommandId::from_code(id.code()), Some(id));
        }
        assert_eq!(CommandId::from_code(0x0000), None);
    }

    #[test]
    fn test_describe_command() {
        assert_eq!(describe_command(0x3831), "Reset(0x3831)");
        assert_eq!(describe_command(0x1234), "0x1234");
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(POS_STATUS, HEADER_SIZE);
        assert_eq!(POS_DATA, HEADER_SIZE + STATUS_SIZE);
    }
}
