//! Announce capability
//!
//! The engine only decides when and what to announce; delivery (platform
//! notification, speech synthesis) belongs to the surrounding application
//! behind the [`Announcer`] seam.

use tracing::info;

/// Fire-and-forget announcement sink.
///
/// Implementations may post a notification, speak the message, or both.
/// The engine neither awaits nor interprets the outcome.
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str);
}

/// Default sink that emits announcements to the log.
#[derive(Debug, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&self, message: &str) {
        info!(target: "hazardwatch::announce", "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingAnnouncer {
        messages: Mutex<Vec<String>>,
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_announcer_is_object_safe() {
        let recorder = RecordingAnnouncer::default();
        let sink: &dyn Announcer = &recorder;
        sink.announce("Attention: test hazard reported 10 m from your location.");
        assert_eq!(recorder.messages.lock().unwrap().len(), 1);
    }
}
