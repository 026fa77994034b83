use super::types::{Dish, DishSummary, MenuData};
use std::collections::{BTreeSet, HashSet};

pub fn find_dish(data: &MenuData, id: i64) -> Option<&Dish> {
    data.dishes.iter().find(|dish| dish.id == id)
}

pub fn find_dish_mut(data: &mut MenuData, id: i64) -> Option<&mut Dish> {
    data.dishes.iter_mut().find(|dish| dish.id == id)
}

/// Every tag across the catalog, sorted, deduplicated.
pub fn all_tags(data: &MenuData) -> Vec<String> {
    let set: BTreeSet<String> = data
        .dishes
        .iter()
        .flat_map(|dish| dish.tags.iter().cloned())
        .collect();
    set.into_iter().collect()
}

/// Splits a search query on commas into terms: trimmed, lowercased, empties
/// dropped. The same shape the tag filter writes into the search input.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// A dish matches when any term is a substring of its lowercased name,
/// description, or any tag. Catalog order is preserved; results are
/// deduplicated by id.
pub fn search_dishes<'a>(data: &'a MenuData, query: &str) -> Vec<&'a Dish> {
    let terms = query_terms(query);
    let mut result = Vec::new();
    let mut seen_ids = HashSet::new();

    for dish in &data.dishes {
        let name = dish.name.to_lowercase();
        let description = dish.description.to_lowercase();
        let tags: Vec<String> = dish.tags.iter().map(|t| t.to_lowercase()).collect();

        let matches = terms.iter().any(|term| {
            name.contains(term.as_str())
                || description.contains(term.as_str())
                || tags.iter().any(|tag| tag.contains(term.as_str()))
        });

        if matches && seen_ids.insert(dish.id) {
            result.push(dish);
        }
    }

    result
}

/// Sorts a listing in place. `"rating"` orders by average descending with
/// unrated dishes last; anything else orders by lowercased name.
pub fn sort_summaries(dishes: &mut [DishSummary], sort: &str) {
    match sort {
        "rating" => dishes.sort_by(|a, b| {
            b.avg_rating
                .unwrap_or(0.0)
                .total_cmp(&a.avg_rating.unwrap_or(0.0))
        }),
        _ => dishes.sort_by_key(|d| d.name.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::menu::types::Review;

    fn dish(id: i64, name: &str, description: &str, tags: &[&str]) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            description: description.to_string(),
            image: String::new(),
            ingredients: vec![],
            preparation: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reviews: vec![],
            avg_rating: None,
        }
    }

    fn catalog() -> MenuData {
        MenuData {
            dishes: vec![
                dish(1, "Feijoada", "Black bean stew", &["brazilian", "hearty"]),
                dish(2, "Moqueca", "Coconut fish stew", &["brazilian", "seafood"]),
                dish(3, "Green Curry", "Spicy Thai curry", &["spicy", "thai"]),
            ],
        }
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(query_terms("Spicy, THAI , ,"), ["spicy", "thai"]);
        assert_eq!(query_terms(""), Vec::<String>::new());
    }

    #[test]
    fn test_search_matches_name_description_and_tags() {
        let data = catalog();

        let by_name: Vec<i64> = search_dishes(&data, "moqueca").iter().map(|d| d.id).collect();
        assert_eq!(by_name, [2]);

        let by_description: Vec<i64> = search_dishes(&data, "stew").iter().map(|d| d.id).collect();
        assert_eq!(by_description, [1, 2]);

        let by_tag: Vec<i64> = search_dishes(&data, "spicy").iter().map(|d| d.id).collect();
        assert_eq!(by_tag, [3]);
    }

    #[test]
    fn test_search_multiple_terms_dedupes_preserving_order() {
        let data = catalog();
        // "brazilian" matches 1 and 2; "stew" matches 1 and 2 again.
        let ids: Vec<i64> = search_dishes(&data, "brazilian, stew")
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_search_is_substring_match() {
        let data = catalog();
        let ids: Vec<i64> = search_dishes(&data, "braz").iter().map(|d| d.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let data = catalog();
        assert_eq!(
            all_tags(&data),
            ["brazilian", "hearty", "seafood", "spicy", "thai"]
        );
    }

    #[test]
    fn test_sort_by_rating_puts_unrated_last() {
        let mut data = catalog();
        data.dishes[1].reviews.push(Review {
            id: "r1".to_string(),
            user: "guest".to_string(),
            rating: 5,
            comment: "!".to_string(),
            date: "2025-08-01".to_string(),
            created_at: 0,
        });
        data.dishes[1].recompute_avg_rating();

        let mut summaries: Vec<DishSummary> = data.dishes.iter().map(DishSummary::from).collect();
        sort_summaries(&mut summaries, "rating");
        assert_eq!(summaries[0].id, 2);

        sort_summaries(&mut summaries, "name");
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Feijoada", "Green Curry", "Moqueca"]);
    }
}
