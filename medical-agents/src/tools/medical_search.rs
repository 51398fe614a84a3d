use crate::data::search_articles;

pub fn search_medical_literature(query: &str) -> String {
    let results = search_articles(query);
    if results.is_empty() {
        return "No articles found matching the query.".to_string();
    }

    results
        .iter()
        .map(|article| {
            format!(
                "[{}] {} ({})\n  {}\n",
                article.id, article.title, article.year, article.abstract_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
