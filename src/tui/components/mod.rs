//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `Header`: title, tagline and request status
//! - `Message`: one conversation turn rendered as a bubble
//! - `FaqPanel`: the quick-action accordion (state lives in `FaqState`)
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: question input, disabled while an answer is pending
//! - `MessageList`: scrollable conversation view with layout caching
//! - `FaqState`: accordion selection and expansion
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props (struct fields), not by
//! reading `App` directly:
//!
//! ```rust,ignore
//! Header::new(app.status_message.clone(), has_unseen).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Top bar)
//! ├── message.rs       (Single turn renderer)
//! ├── message_list.rs  (Scrollable turn container)
//! ├── faq.rs           (Quick-action accordion)
//! └── input_box/       (Question input)
//! ```

pub mod faq;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;

pub use faq::{FaqEvent, FaqPanel, FaqState};
pub use header::{HEADER_HEIGHT, Header};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
