use crate::domain::{NestedRatings, OtherStuff, PizzaComponent, RatingRecord};
use std::borrow::Cow;
use tracing::trace;

/// Returns the canonical nested view of a rating record.
///
/// Nested records are borrowed as they are. Flat records predate the
/// sub-category schema, so the synthesized view has no overall score and no
/// dishes; only flat keys that happen to name a pizza component or an
/// "other stuff" item survive. Everything else is dropped without error.
pub fn normalize(record: &RatingRecord) -> Cow<'_, NestedRatings> {
    match record {
        RatingRecord::Nested(nested) => Cow::Borrowed(nested),
        RatingRecord::Flat(scores) => {
            let mut nested = NestedRatings::default();

            for (key, &score) in scores {
                if let Some(component) = PizzaComponent::from_key(key) {
                    nested.pizza_components.insert(component, score);
                } else if let Some(item) = OtherStuff::from_key(key) {
                    nested.other_stuff.insert(item, score);
                } else {
                    trace!("Flat rating key {key} matches no category");
                }
            }

            Cow::Owned(nested)
        }
    }
}
