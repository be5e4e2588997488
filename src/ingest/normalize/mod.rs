//! Pure, total field normalizers. None of them fail: unparseable input
//! degrades to an empty, zero or default value.

pub mod amenities;
pub mod area;
pub mod contact;
pub mod images;
pub mod price;
pub mod status;
pub mod units;

pub use amenities::parse_amenities;
pub use area::parse_carpet_areas;
pub use contact::{parse_contact, ContactInfo};
pub use images::parse_image_urls;
pub use price::parse_price;
pub use status::infer_status;
pub use units::parse_total_units;
