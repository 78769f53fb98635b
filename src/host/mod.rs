pub mod icon;
pub mod mock;
pub mod tabs;

pub use icon::{IconError, IconKind, IconSurface};
pub use tabs::{CreateTabRequest, LiveTab, TabError, TabHost, TabId};
