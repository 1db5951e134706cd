/// A long-lived component owned by the host application.
pub trait Service {
    fn name(&self) -> &'static str;
}
