/// Conversion between typed aggregate ids and their string form in the database
pub trait AggregateId: Sized {
    fn as_string(&self) -> String;

    fn from_string(s: &str) -> Result<Self, String>;
}
