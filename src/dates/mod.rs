//! Date Handling Module
//!
//! The remote catalog ships dates as free-form `DD-MM-YYYY` strings, sometimes
//! prefixed with a recurring/uncertain marker (`*`). Two representations are built
//! from them:
//!
//! - **Encoded keys** (`encoder`): the word segments of the string are reversed so
//!   that plain byte-wise comparison follows chronological order. Used for the
//!   global date index and for matching concert dates.
//! - **`CalendarDate`** (`calendar`): a parsed year/month/day triple with a total
//!   order. Used wherever two dates are compared as bounds.

pub mod calendar;
pub mod encoder;

pub use calendar::CalendarDate;
pub use encoder::{RECURRING_MARKER, concert_date_key, reverse_words, strip_marker};
