pub mod decode;
pub mod encode;
pub mod info;
pub mod stream_decode;
pub mod stream_encode;
