/// A named animation clip.
///
/// Keyframe data stays with the rendering layer that samples poses; the blend
/// logic here only needs to know how long one loop of the clip lasts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// Builds a clip whose duration is the last keyframe time across all of
    /// its channels.
    pub fn from_keyframe_times<I>(name: impl Into<String>, channel_end_times: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let duration = channel_end_times.into_iter().fold(0.0_f32, f32::max);
        Self::new(name, duration)
    }
}
