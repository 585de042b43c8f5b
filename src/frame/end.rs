//! Session and record delimiters: empty frames identified solely by address.

use super::Frame;

const LENGTH: u8 = 0x0;
const TYPE: u8 = 0x00;

macro_rules! marker_frame {
    ($name:ident, $address:expr, $doc:tt) => {
        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Frame);

        impl $name {
            pub fn matches(frame: &Frame) -> bool {
                frame.length() == LENGTH && frame.frame_type() == TYPE && frame.address() == $address
            }

            pub(crate) fn from_frame(frame: Frame) -> Self {
                Self(frame)
            }

            pub fn build() -> Self {
                Self(Frame::new(TYPE, $address, Vec::new()))
            }

            pub fn frame(&self) -> &Frame {
                &self.0
            }

            pub fn into_frame(self) -> Frame {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::build()
            }
        }
    };
}

marker_frame!(EndOfRecord, 0x0100, "Closes the current record group.");
marker_frame!(EndOfTransmission, 0xFF00, "Closes the transmission session.");
