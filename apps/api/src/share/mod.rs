// Sharing surface: self-contained share tokens, QR rendering, guest view.
// The token carries the full poem — no storage, no expiry; a second viewer
// opens the exact text without regenerating it.

pub mod codec;
pub mod handlers;
pub mod qr;
