pub mod doc_panel;
pub mod footer;
pub mod header;
pub mod landing;
pub mod support;
pub mod thread;

pub use doc_panel::DocPanel;
pub use footer::Footer;
pub use header::Header;
pub use landing::Landing;
pub use support::SupportModal;
pub use thread::Thread;
