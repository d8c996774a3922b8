//! Common types used in the protocol.

/// Identifier of a device-side resource (layer, image, font, window, ...).
pub type ResourceId = u16;

/// A point on the display, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Horizontal offset from the left edge.
    pub x: u16,
    /// Vertical offset from the top edge.
    pub y: u16,
}

impl Position {
    /// Create a new position.
    pub fn new(x: u16, y: u16) -> Self {
        Position { x, y }
    }
}

/// A width/height pair, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    pub fn new(width: u16, height: u16) -> Self {
        Size { width, height }
    }

    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An RGBA color. Encoded on the wire as four bytes: red, green, blue, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel.
    pub alpha: u8,
}

impl Color {
    /// Create a new color.
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fully opaque color.
    pub fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Color::new(red, green, blue, 0xFF)
    }

    /// Wire representation.
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Horizontal text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HDirection {
    /// Left (wire value 0).
    #[default]
    Left,
    /// Right (wire value 1).
    Right,
}

impl From<HDirection> for u8 {
    fn from(direction: HDirection) -> Self {
        match direction {
            HDirection::Left => 0,
            HDirection::Right => 1,
        }
    }
}

/// Stacking direction of bar graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (wire value 0).
    #[default]
    Horizontal,
    /// Vertical (wire value 1).
    Vertical,
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
        }
    }
}

/// Which version string `SystemInfo` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionType {
    /// Device application version.
    DevApp,
    /// Hardware revision.
    Hardware,
    /// Operating system version.
    Os,
}

impl From<VersionType> for u16 {
    fn from(kind: VersionType) -> Self {
        match kind {
            VersionType::DevApp => 0,
            VersionType::Hardware => 1,
            VersionType::Os => 2,
        }
    }
}

impl std::str::FromStr for VersionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "devapp" | "app" => Ok(VersionType::DevApp),
            "hardware" | "hw" => Ok(VersionType::Hardware),
            "os" => Ok(VersionType::Os),
            other => Err(format!("unknown version type '{}'", other)),
        }
    }
}

/// Kind of an asynchronous event reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// An animation reached a notable frame.
    Animation,
    /// A touch map region was hit.
    Touch,
    /// Event type not known to this library.
    Other(u8),
}

impl From<u8> for EventType {
    fn from(code: u8) -> Self {
        match code {
            0 => EventType::Animation,
            1 => EventType::Touch,
            other => EventType::Other(other),
        }
    }
}

impl From<EventType> for u8 {
    fn from(kind: EventType) -> Self {
        match kind {
            EventType::Animation => 0,
            EventType::Touch => 1,
            EventType::Other(code) => code,
        }
    }
}

/// An event notification taken from an event batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// What kind of event this is.
    pub event_type: EventType,
    /// Raw event data; layout depends on the event type.
    pub data: Vec<u8>,
    /// Whether the device holds further pending batches.
    /// Shared by every event in one batch.
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bytes() {
        let color = Color::new(1, 2, 3, 4);
        assert_eq!(color.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Color::opaque(9, 8, 7).alpha, 0xFF);
    }

    #[test]
    fn test_event_type_codes() {
        assert_eq!(EventType::from(0), EventType::Animation);
        assert_eq!(EventType::from(1), EventType::Touch);
        assert_eq!(EventType::from(7), EventType::Other(7));
        assert_eq!(u8::from(EventType::Other(7)), 7);
    }

    #[test]
    fn test_version_type_parse() {
        assert_eq!("hardware".parse::<VersionType>(), Ok(VersionType::Hardware));
        assert_eq!("OS".parse::<VersionType>(), Ok(VersionType::Os));
        assert!("firmware".parse::<VersionType>().is_err());
        assert_eq!(u16::from(VersionType::DevApp), 0);
    }

    #[test]
    fn test_size_area() {
        assert_eq!(Size::new(3, 4).area(), 12);
        assert_eq!(Size::new(u16::MAX, u16::MAX).area(), 65535 * 65535);
    }
}
