use crate::domain::{Category, NestedRatings, OrderedItem};

/// A single rating value pulled out of a record for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDatum {
    pub category: Category,
    pub value: f64,
    /// Raw order text for per-dish categories.
    pub item: Option<String>,
}

impl CategoryDatum {
    fn new(category: Category, value: f64) -> Self {
        Self {
            category,
            value,
            item: None,
        }
    }
}

/// Walks a normalized record and yields every datum it contributes.
///
/// Only finite values become data. A missing value never turns into a zero.
pub fn extract(ratings: &NestedRatings) -> Vec<CategoryDatum> {
    let mut data = Vec::new();

    if let Some(overall) = finite(ratings.overall) {
        data.push(CategoryDatum::new(Category::Overall, overall));
    }

    if let Some(pizza_overall) = pizza_overall(ratings) {
        data.push(CategoryDatum::new(Category::PizzaOverall, pizza_overall));
    }

    data.extend(
        ratings
            .pizza_components
            .iter()
            .filter(|(_, value)| value.is_finite())
            .map(|(&component, &value)| {
                CategoryDatum::new(Category::Component(component), value)
            }),
    );

    data.extend(
        ratings
            .other_stuff
            .iter()
            .filter(|(_, value)| value.is_finite())
            .map(|(&item, &value)| CategoryDatum::new(Category::OtherStuff(item), value)),
    );

    data.extend(dish_data(Category::NamedPizza, &ratings.pizzas));
    data.extend(dish_data(Category::NamedAppetizer, &ratings.appetizers));

    data
}

/// The explicit pizza-overall score, or the mean of the rated pizzas.
pub fn pizza_overall(ratings: &NestedRatings) -> Option<f64> {
    if let Some(explicit) = finite(ratings.pizza_overall) {
        return Some(explicit);
    }

    // Running mean, so large ratings cannot overflow a sum.
    let (count, mean) = ratings
        .pizzas
        .iter()
        .filter_map(|pizza| finite(pizza.rating))
        .fold((0_u32, 0.0_f64), |(n, mean), rating| {
            let n = n + 1;
            (n, mean + (rating - mean) / f64::from(n))
        });
    if count == 0 {
        return None;
    }
    finite(Some(mean))
}

fn dish_data(
    category: Category,
    items: &[OrderedItem],
) -> impl Iterator<Item = CategoryDatum> + '_ {
    items.iter().filter_map(move |dish| {
        let value = finite(dish.rating)?;
        Some(CategoryDatum {
            category,
            value,
            item: Some(dish.order.clone()),
        })
    })
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OtherStuff, PizzaComponent, RatingRecord};
    use crate::services::normalizing::normalize;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn extract_from(value: Value) -> Vec<CategoryDatum> {
        let record = RatingRecord::from_value(&value);
        extract(&normalize(&record))
    }

    fn value_for(data: &[CategoryDatum], category: Category) -> Option<f64> {
        data.iter()
            .find(|datum| datum.category == category)
            .map(|datum| datum.value)
    }

    #[test]
    fn extracts_every_family_from_a_full_record() {
        let data = extract_from(json!({
            "overall": 4.5,
            "pizzaOverall": 4.25,
            "pizzas": [
                { "order": "14\" Pepperoni", "rating": 4.5 },
                { "order": "Margherita", "rating": 4.0 }
            ],
            "appetizers": [{ "order": "Garlic knots", "rating": 3.5 }],
            "pizza-components": { "crust": 4, "cheese": 5 },
            "the-other-stuff": { "atmosphere": 3 }
        }));

        assert_eq!(value_for(&data, Category::Overall), Some(4.5));
        assert_eq!(value_for(&data, Category::PizzaOverall), Some(4.25));
        assert_eq!(
            value_for(&data, Category::Component(PizzaComponent::Cheese)),
            Some(5.0)
        );
        assert_eq!(
            value_for(&data, Category::OtherStuff(OtherStuff::Atmosphere)),
            Some(3.0)
        );

        let pizzas: Vec<_> = data
            .iter()
            .filter(|datum| datum.category == Category::NamedPizza)
            .map(|datum| datum.item.as_deref())
            .collect();
        assert_eq!(pizzas, vec![Some("14\" Pepperoni"), Some("Margherita")]);
        assert_eq!(value_for(&data, Category::NamedAppetizer), Some(3.5));
    }

    #[rstest]
    #[case(json!({ "pizzas": [{ "order": "A", "rating": 4 }, { "order": "B", "rating": 3 }] }), Some(3.5))]
    #[case(json!({ "pizzaOverall": 2, "pizzas": [{ "order": "A", "rating": 5 }] }), Some(2.0))]
    #[case(json!({ "pizzaOverall": "n/a", "pizzas": [{ "order": "A", "rating": 5 }, { "order": "B" }] }), Some(5.0))]
    #[case(json!({ "pizzas": [{ "order": "A", "rating": 1e308 }, { "order": "B", "rating": 1e308 }] }), Some(1e308))]
    #[case(json!({ "pizzas": [] }), None)]
    #[case(json!({ "pizzas": [{ "order": "A", "rating": null }] }), None)]
    fn pizza_overall_prefers_explicit_then_mean(
        #[case] value: Value,
        #[case] expected: Option<f64>,
    ) {
        let data = extract_from(value);
        assert_eq!(value_for(&data, Category::PizzaOverall), expected);
    }

    #[test]
    fn absent_values_produce_no_data() {
        let data = extract_from(json!({
            "overall": null,
            "pizzas": [{ "order": "Plain" }],
            "pizza-components": { "crust": "soggy" },
            "the-other-stuff": {}
        }));
        assert!(data.is_empty());
    }

    #[test]
    fn legacy_flat_record_contributes_only_matching_keys() {
        let data = extract_from(json!({ "overall": 5, "sauce": 4, "ambience": 2 }));
        assert_eq!(
            data,
            vec![CategoryDatum::new(
                Category::Component(PizzaComponent::Sauce),
                4.0
            )]
        );
    }
}
