use std::time::Duration;

use plateforme_client::catalogue::{CompanyFacet, CompanyFacetKind, DesignerFacet};
use plateforme_client::config::ClientOptions;
use plateforme_client::scope::Scope;
use plateforme_client::Plateforme;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn designers(n: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            json!({
                "id": format!("d{}", i),
                "firstname": "First",
                "lastname": format!("Last{}", i),
                "profession": if i % 2 == 0 { "Architect" } else { "Illustrator" },
                "specialties": ["Lighting"],
                "countryOfResidence": if i < 7 { "france " } else { "Belgium" }
            })
        })
        .collect();
    json!(list)
}

async fn mount_designers(server: &MockServer, n: usize) {
    Mock::given(method("GET"))
        .and(path("/designers/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(designers(n)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_designer_catalogue_pages() {
    let server = MockServer::start().await;
    mount_designers(&server, 120).await;

    let client = Plateforme::new(&server.uri()).unwrap();
    let catalogue = client.designer_catalogue();
    let loaded = catalogue.load(client.designers()).await.unwrap();

    assert_eq!(loaded, 120);
    assert_eq!(catalogue.max_page(), 3);
    let first = catalogue.page_items();
    assert_eq!(first.len(), 50);
    assert_eq!(first[0].id, "d0");
    assert_eq!(first[49].id, "d49");

    catalogue.go_to_page(3);
    let last = catalogue.page_items();
    assert_eq!(last.len(), 20);
    assert_eq!(last[0].id, "d100");
    assert_eq!(last[19].id, "d119");
}

#[tokio::test]
async fn test_filter_by_string_and_reset() {
    let server = MockServer::start().await;
    mount_designers(&server, 120).await;

    let client = Plateforme::new(&server.uri()).unwrap();
    let catalogue = client.designer_catalogue();
    catalogue.load(client.designers()).await.unwrap();
    catalogue.go_to_page(2);

    catalogue.research_str("country", "France").unwrap();
    assert_eq!(catalogue.current_page(), 1);
    assert_eq!(catalogue.filtered().len(), 7);
    assert_eq!(catalogue.max_page(), 1);

    let err = catalogue.research_str("colour", "blue").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        catalogue.criteria(),
        Some(DesignerFacet::Country("France".to_string()))
    );

    catalogue.reset_research();
    assert_eq!(catalogue.criteria(), None);
    assert_eq!(catalogue.filtered().len(), 120);
    assert_eq!(catalogue.current_page(), 1);
}

#[tokio::test]
async fn test_bound_view_tracks_reload() {
    let server = MockServer::start().await;
    mount_designers(&server, 120).await;

    let options = ClientOptions::default().with_page_size(50);
    let client = Plateforme::new_with_options(&server.uri(), options).unwrap();
    let catalogue = client.designer_catalogue();

    let mut scope = Scope::new();
    let view = catalogue.bind(&mut scope);
    assert_eq!(view.get().total, 0);
    assert_eq!(view.get().max_page, 1);

    client.designers().load_designers().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(view.get().total, 120);
    assert_eq!(view.get().max_page, 3);

    catalogue.research(DesignerFacet::Profession("architect".to_string()));
    tokio::time::sleep(Duration::from_millis(50)).await;
    let current = view.get();
    assert_eq!(current.total, 60);
    assert_eq!(current.page, 1);
    assert_eq!(current.items.len(), 50);
    assert!(current.items.iter().all(|d| d.profession == "Architect"));

    scope.close().await;
}

#[tokio::test]
async fn test_company_catalogue_facets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "c1",
                "name": "Atelier",
                "type": "Studio",
                "sector": "Retail",
                "country": "France"
            },
            {
                "id": "c2",
                "name": "Forge",
                "type": "Startup",
                "sectors": ["Industry", "Retail"],
                "country": "Spain"
            },
            { "id": "c3", "name": "Nord", "type": " studio", "country": "France" }
        ])))
        .mount(&server)
        .await;

    let client = Plateforme::new(&server.uri()).unwrap();
    let catalogue = client.company_catalogue();
    catalogue.load(client.companies()).await.unwrap();

    assert_eq!(
        catalogue.facet_options(CompanyFacetKind::Type),
        vec!["Studio".to_string(), "Startup".to_string(), "studio".to_string()]
    );

    catalogue.research(CompanyFacet::Type("studio".to_string()));
    assert_eq!(catalogue.filtered().len(), 2);

    catalogue.research(CompanyFacet::Sector("retail".to_string()));
    let ids: Vec<String> = catalogue.filtered().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["c1".to_string(), "c2".to_string()]);
}
