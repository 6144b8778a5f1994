use super::todo::Task;

/// Single durable slot holding the serialized collection. Implementations
/// overwrite the whole value on every `persist`; there is no partial update.
pub trait StateSlot: Send + 'static {
    fn persist(&mut self, tasks: &[Task]) -> anyhow::Result<()>;

    /// Returns the stored collection. An absent slot yields an empty
    /// collection; so does one whose contents fail to decode (availability
    /// over alerting — the caller never sees a corruption error).
    fn restore(&self) -> anyhow::Result<Vec<Task>>;
}
