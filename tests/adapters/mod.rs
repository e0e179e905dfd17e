// Mock implementations for adapter layer testing

pub mod mock_audio;
pub mod mock_rest_client;

pub use mock_audio::MockAudioController;
pub use mock_rest_client::{MockResponse, MockRestClient, RecordedCall};
