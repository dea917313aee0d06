use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "CRUD API for products, schools and categories"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/schools", api = domain_schools::ApiDoc),
        (path = "/categories", api = domain_categories::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for resource in ["products", "schools", "categories"] {
            assert!(
                paths.iter().any(|p| p.as_str() == format!("/{resource}")),
                "missing /{resource} in {paths:?}"
            );
            assert!(
                paths
                    .iter()
                    .any(|p| p.as_str() == format!("/{resource}/{{id}}")),
                "missing /{resource}/{{id}} in {paths:?}"
            );
        }
    }

    #[test]
    fn test_item_routes_document_patch_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/categories/{id}")
            .expect("category item path");

        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
        assert!(item.put.is_none());
    }
}
