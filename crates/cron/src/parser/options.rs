//! Field selection flags for the parser.

bitflags::bitflags! {
    /// Which fields a [`Parser`](super::Parser) expects, in expression order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseOptions: u16 {
        /// Seconds field, mandatory.
        const SECOND = 1 << 0;
        /// Seconds field, may be left out (defaults to `0`).
        const SECOND_OPTIONAL = 1 << 1;
        const MINUTE = 1 << 2;
        const HOUR = 1 << 3;
        const DOM = 1 << 4;
        const MONTH = 1 << 5;
        /// Day-of-week field, mandatory.
        const DOW = 1 << 6;
        /// Day-of-week field, may be left out (defaults to `*`).
        const DOW_OPTIONAL = 1 << 7;
        /// Accept `@yearly`, `@daily`, ...
        const DESCRIPTOR = 1 << 8;

        /// `min hour dom month dow` plus descriptors.
        const STANDARD = Self::MINUTE.bits()
            | Self::HOUR.bits()
            | Self::DOM.bits()
            | Self::MONTH.bits()
            | Self::DOW.bits()
            | Self::DESCRIPTOR.bits();
    }
}
