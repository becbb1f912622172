// record
/// Build a `Record` from `field => value` pairs; values go through `Value::from`.
///
/// ```ignore
/// let bob = record! { "name" => "Bob", "age" => 20 };
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::record::Record::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::record::Record::new();
        $(
            record.insert($field, $crate::value::Value::from($value));
        )+
        record
    }};
}
