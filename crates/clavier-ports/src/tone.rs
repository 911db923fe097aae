/// Commands to the audio collaborator, addressed by pitch name ("C#4").
///
/// Fire-and-forget: implementations must be idempotent and must never block,
/// since these are issued from the input-event path.
pub trait TonePort: Send + Sync {
    fn start_tone(&self, pitch: &str);
    fn stop_tone(&self, pitch: &str);

    /// Silence everything, including voices the caller may have lost track of.
    fn stop_all_tones(&self);
}
