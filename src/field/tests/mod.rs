mod codec_tests;
mod text_tests;
