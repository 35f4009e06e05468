use async_trait::async_trait;
use mockito::{Matcher, Server};
use recipe_browser::{
    FetchResult, MealDbClient, Recipe, RecipeApi, RecipeError, RecipeListResponse,
    RecipeRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const ARRABIATA: &str = r#"{
    "meals": [{
        "idMeal": "52771",
        "strMeal": "Spaghetti Arrabiata",
        "strCategory": "Vegetarian",
        "strArea": "Italian",
        "strInstructions": "Bring a large pot of water to a boil.\r\nAdd kosher salt.\r\n\r\nDrain the pasta.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/ustsqw1468250014.jpg",
        "strYoutube": "https://www.youtube.com/watch?v=1IszT_guI08",
        "strIngredient1": "penne rigate",
        "strIngredient2": "olive oil",
        "strIngredient3": "garlic",
        "strIngredient4": "chopped tomatoes",
        "strIngredient5": "red chilli flakes",
        "strIngredient6": "",
        "strIngredient7": null,
        "strMeasure1": "1 pound",
        "strMeasure2": "1/4 cup",
        "strMeasure3": "3 cloves",
        "strMeasure4": "1 tin ",
        "strMeasure5": "1/2 teaspoon",
        "strMeasure6": "",
        "strMeasure7": null
    }]
}"#;

fn repository_for(server: &Server) -> RecipeRepository {
    let client = MealDbClient::with_base_url(&server.url(), None).unwrap();
    RecipeRepository::new(Arc::new(client))
}

#[tokio::test]
async fn test_search_arrabiata_scenario() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "arrabiata".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ARRABIATA)
        .create_async()
        .await;

    let repository = repository_for(&server);
    let mut events = Vec::new();
    let result = repository
        .search_recipes("arrabiata", |e| events.push(e))
        .await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], FetchResult::Loading);
    assert_eq!(events[1], result);

    let meals = result.into_result().unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].name, "Spaghetti Arrabiata");
    assert_eq!(meals[0].ingredients().len(), 5);
    assert_eq!(meals[0].instruction_steps().len(), 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_null_meals_is_no_recipes_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    let result = repository_for(&server).search_recipes("zzz", |_| {}).await;
    assert_eq!(result, FetchResult::Error("No recipes found".to_string()));
}

#[tokio::test]
async fn test_search_empty_list_is_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals":[]}"#)
        .create_async()
        .await;

    let result = repository_for(&server).search_recipes("zzz", |_| {}).await;
    assert_eq!(result, FetchResult::Success(vec![]));
}

#[tokio::test]
async fn test_lookup_null_and_empty_are_not_found() {
    for body in [r#"{"meals":null}"#, r#"{"meals":[]}"#] {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let mut events = Vec::new();
        let result = repository_for(&server)
            .get_recipe_by_id("1", |e| events.push(e))
            .await;

        assert_eq!(result, FetchResult::Error("Recipe not found".to_string()));
        assert_eq!(events, vec![FetchResult::Loading, result]);
    }
}

#[tokio::test]
async fn test_category_null_meals_is_no_recipes_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Nothing".into()))
        .with_status(200)
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    let result = repository_for(&server)
        .get_recipes_by_category("Nothing", |_| {})
        .await;
    assert_eq!(result, FetchResult::Error("No recipes found".to_string()));
}

#[tokio::test]
async fn test_category_partial_records() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Seafood".into()))
        .with_status(200)
        .with_body(
            r#"{"meals":[
                {"strMeal":"Baked salmon with fennel & tomatoes","strMealThumb":"https://x/1.jpg","idMeal":"52959"},
                {"strMeal":"Cajun spiced fish tacos","strMealThumb":"https://x/2.jpg","idMeal":"52819"}
            ]}"#,
        )
        .create_async()
        .await;

    let meals = repository_for(&server)
        .get_recipes_by_category("Seafood", |_| {})
        .await
        .into_result()
        .unwrap();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[1].id, "52819");
    assert!(meals[1].instructions.is_none());
}

#[tokio::test]
async fn test_random_issues_one_call_per_recipe() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_body(ARRABIATA)
        .expect(3)
        .create_async()
        .await;

    let result = repository_for(&server).get_random_recipes(3, |_| {}).await;

    // Repeats are kept as-is
    let meals = result.into_result().unwrap();
    assert_eq!(meals.len(), 3);
    assert!(meals.iter().all(|m| m.id == "52771"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_is_error_state() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let mut events = Vec::new();
    let result = repository_for(&server)
        .search_recipes("pie", |e| events.push(e))
        .await;

    match &result {
        FetchResult::Error(message) => assert!(message.contains("500")),
        other => panic!("Expected error, got {:?}", other),
    }
    assert_eq!(events.len(), 2);
}

/// Random endpoint whose n-th call (1-based) fails.
struct FailingRandomApi {
    calls: AtomicUsize,
    fail_on: usize,
}

#[async_trait]
impl RecipeApi for FailingRandomApi {
    async fn search_recipes(&self, _query: &str) -> Result<RecipeListResponse, RecipeError> {
        unreachable!("search is not used")
    }

    async fn get_recipe_by_id(&self, _id: &str) -> Result<RecipeListResponse, RecipeError> {
        unreachable!("lookup is not used")
    }

    async fn get_random_recipe(&self) -> Result<RecipeListResponse, RecipeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(RecipeError::Status {
                status: 502,
                url: "random.php".to_string(),
            });
        }
        Ok(RecipeListResponse {
            meals: Some(vec![Recipe {
                id: call.to_string(),
                name: format!("Random {}", call),
                ..Default::default()
            }]),
        })
    }

    async fn get_recipes_by_category(
        &self,
        _category: &str,
    ) -> Result<RecipeListResponse, RecipeError> {
        unreachable!("category filter is not used")
    }
}

#[tokio::test]
async fn test_random_failure_discards_partial_results() {
    let api = Arc::new(FailingRandomApi {
        calls: AtomicUsize::new(0),
        fail_on: 2,
    });
    let repository = RecipeRepository::new(api.clone());

    let mut events = Vec::new();
    let result = repository.get_random_recipes(3, |e| events.push(e)).await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], FetchResult::Loading);
    assert!(matches!(events[1], FetchResult::Error(_)));
    assert_eq!(events[1], result);
    // The batch stops at the failing call
    assert_eq!(api.calls.load(Ordering::SeqCst), 2);
}

/// Hits the real TheMealDB API
#[tokio::test]
#[ignore]
async fn test_real_api_search() {
    let client = MealDbClient::new(None).unwrap();
    let repository = RecipeRepository::new(Arc::new(client));

    let meals = repository
        .search_recipes("Arrabiata", |_| {})
        .await
        .into_result()
        .unwrap();
    assert!(!meals.is_empty());
}
