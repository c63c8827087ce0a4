use vconf_domain::snapshot::{CREATED_AT, CREATED_BY, ENABLED, ID};
use vconf_domain::{Schema, Snapshot};

/// Fields skipped by default when comparing a candidate with the current snapshot.
pub const DEFAULT_IGNORED: [&str; 3] = [ID, CREATED_AT, CREATED_BY];

/// Compares `id`, `created_at`, `created_by`, `enabled` and every compared schema field of
/// two snapshots, skipping names listed in `ignore`. Many-to-many fields never count.
pub fn fields_equal<S: AsRef<str>>(
    schema: &Schema,
    a: &Snapshot,
    b: &Snapshot,
    ignore: &[S],
) -> bool {
    let ignored = |name: &str| ignore.iter().any(|i| i.as_ref() == name);

    let base_equal = [ID, CREATED_AT, CREATED_BY, ENABLED]
        .into_iter()
        .filter(|name| !ignored(*name))
        .all(|name| a.value(name) == b.value(name));

    base_equal
        && schema
            .compared_fields()
            .filter(|field| !ignored(field.name()))
            .all(|field| a.field(field.name()) == b.field(field.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vconf_domain::{FieldDescriptor, FieldValue};

    fn schema() -> Schema {
        Schema::builder("s")
            .field(FieldDescriptor::text("string_field"))
            .field(FieldDescriptor::integer("int_field").with_default(10))
            .field(FieldDescriptor::many_to_many("tags"))
            .build()
            .unwrap()
    }

    #[test]
    fn base_fields_count_unless_ignored() {
        let schema = schema();
        let a = Snapshot::transient(&schema);
        let mut b = a.clone();
        b.id = Some(1);

        assert!(fields_equal(&schema, &a, &b, &DEFAULT_IGNORED));
        assert!(!fields_equal(&schema, &a, &b, &[CREATED_AT, CREATED_BY]));

        b.enabled = true;
        assert!(!fields_equal(&schema, &a, &b, &DEFAULT_IGNORED));
        assert!(fields_equal(&schema, &a, &b, &[ID, ENABLED]));
    }

    #[test]
    fn many_to_many_never_counts() {
        let schema = schema();
        let a = Snapshot::transient(&schema);
        let mut b = a.clone();
        b.set("tags", FieldValue::List(vec![1.into()]));
        assert!(fields_equal(&schema, &a, &b, &DEFAULT_IGNORED));

        b.set("int_field", 20);
        assert!(!fields_equal(&schema, &a, &b, &DEFAULT_IGNORED));
        assert!(fields_equal(&schema, &a, &b, &["id", "created_at", "created_by", "int_field"]));
    }
}
