/// Build a `Vec<Field>` from mixed identifiers and [`Raw`](crate::Raw)
/// fragments.
///
/// ```ignore
/// use sqlchain::{fields, raw, Builder};
///
/// let b = Builder::new("user").select(fields!["sex", raw("count(*) as c")]);
/// ```
#[macro_export]
macro_rules! fields {
    ($($field:expr),* $(,)?) => {
        ::std::vec![$($crate::Field::from($field)),*]
    };
}

/// Build a `Vec<Value>` from values of mixed types.
///
/// ```ignore
/// Builder::new("user").where_in("id", sqlchain::values![1, "2", 3.5]);
/// ```
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),*]
    };
}

/// Build a [`Record`](crate::Record) keeping the written column order.
///
/// ```ignore
/// let row = sqlchain::record! { "name" => "a", "age" => 18 };
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.set($field, $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::{Field, Record, Value, raw};

    #[test]
    fn fields_mix_raw_and_idents() {
        let list = fields!["sex", raw("count(*) as c")];
        assert_eq!(
            list,
            vec![Field::Ident("sex".into()), Field::Raw("count(*) as c".into())]
        );
    }

    #[test]
    fn values_convert_each_item() {
        assert_eq!(
            values![1, "a", true],
            vec![Value::Int(1), Value::from("a"), Value::Bool(true)]
        );
    }

    #[test]
    fn record_keeps_order() {
        let row = record! { "b" => 1, "a" => "x" };
        assert_eq!(row.fields().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(record! {}, Record::new());
    }
}
