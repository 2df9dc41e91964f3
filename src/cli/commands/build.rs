//! Trigger build command
//!
//! The five-stage pipeline: product, workflow, repository, source, submit.
//! Strictly sequential, one request in flight at a time.

use colored::Colorize;

use crate::appstore::{
    reconcile_bundle_ids, AppStoreClient, BuildSource, GitReference, Product, PullRequest,
    Repository, Workflow,
};
use crate::cli::args::{BuildArgs, OutputFormat};
use crate::cli::{prompt, select};
use crate::error::Result;

/// Handle the build command
pub fn build(client: &AppStoreClient, args: &BuildArgs, format: OutputFormat) -> Result<String> {
    args.validate()?;

    let product = resolve_product(client, args.product.as_deref())?;
    let workflow = resolve_workflow(client, &product, args.workflow.as_deref())?;
    let repository = client.get_repository(&workflow.id)?;
    let (source, source_label) = resolve_source(client, &repository, args)?;

    client.create_build_run(&workflow.id, &source)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Build started: {} / {} from {}",
            "✓".green(),
            product.attributes.name.bold(),
            workflow.attributes.name.bold(),
            source_label
        )),
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "product": { "id": product.id, "name": product.attributes.name },
                "workflow": { "id": workflow.id, "name": workflow.attributes.name },
                "source": match &source {
                    BuildSource::Reference(id) => {
                        serde_json::json!({ "kind": "gitReference", "id": id })
                    }
                    BuildSource::PullRequest(id) => {
                        serde_json::json!({ "kind": "pullRequest", "id": id })
                    }
                },
            });
            Ok(serde_json::to_string_pretty(&summary)?)
        }
    }
}

/// Fetch products, reconcile bundle identifiers, and pick one by name
pub(crate) fn resolve_product(
    client: &AppStoreClient,
    filter: Option<&str>,
) -> Result<Product> {
    let bundle_ids = client.list_bundle_ids()?;
    let mut products = client.list_products()?;
    reconcile_bundle_ids(&mut products, &bundle_ids);

    select::resolve(
        "Product",
        filter,
        products,
        Product::display_name,
        |product, wanted| product.attributes.name == wanted,
    )
}

fn resolve_workflow(
    client: &AppStoreClient,
    product: &Product,
    filter: Option<&str>,
) -> Result<Workflow> {
    let workflows = client.list_workflows(&product.id)?;
    select::resolve(
        "Workflow",
        filter,
        workflows,
        |workflow| workflow.attributes.name.clone(),
        |workflow, wanted| workflow.attributes.name == wanted,
    )
}

/// Decide and resolve the single source the build runs from.
///
/// An explicit --reference wins, then an explicit --pull-request. With
/// neither, a repository with no open pull requests goes straight to the
/// reference path; otherwise the user picks the source type.
fn resolve_source(
    client: &AppStoreClient,
    repository: &Repository,
    args: &BuildArgs,
) -> Result<(BuildSource, String)> {
    if let Some(name) = args.reference.as_deref() {
        return resolve_reference(client, repository, Some(name));
    }

    if let Some(number) = args.pull_request {
        return resolve_pull_request(client, repository, Some(number));
    }

    let pull_requests = client.list_pull_requests(&repository.id)?;
    if pull_requests.is_empty() {
        return resolve_reference(client, repository, None);
    }

    const SOURCE_KINDS: [&str; 2] = ["Git Reference", "Pull Request"];
    match prompt::choose("Start the build from", &SOURCE_KINDS)? {
        0 => resolve_reference(client, repository, None),
        _ => pick_pull_request(pull_requests, None),
    }
}

fn resolve_reference(
    client: &AppStoreClient,
    repository: &Repository,
    filter: Option<&str>,
) -> Result<(BuildSource, String)> {
    let references = client.list_git_references(&repository.id)?;
    let reference = select::resolve(
        "Git reference",
        filter,
        references,
        GitReference::display_name,
        |reference, wanted| reference.attributes.name == wanted,
    )?;

    let label = reference.display_name();
    Ok((BuildSource::Reference(reference.id), label))
}

fn resolve_pull_request(
    client: &AppStoreClient,
    repository: &Repository,
    number: Option<u64>,
) -> Result<(BuildSource, String)> {
    let pull_requests = client.list_pull_requests(&repository.id)?;
    pick_pull_request(pull_requests, number)
}

fn pick_pull_request(
    pull_requests: Vec<PullRequest>,
    number: Option<u64>,
) -> Result<(BuildSource, String)> {
    let wanted = number.map(|n| n.to_string());
    let pull_request = select::resolve(
        "Pull request",
        wanted.as_deref(),
        pull_requests,
        PullRequest::display_name,
        |pr, wanted| pr.attributes.number.to_string() == wanted,
    )?;

    let label = pull_request.display_name();
    Ok((BuildSource::PullRequest(pull_request.id), label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XccError;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> AppStoreClient {
        AppStoreClient::with_token("test-token", server.url()).unwrap()
    }

    fn mock_collection(
        server: &mut mockito::ServerGuard,
        path: &str,
        data: serde_json::Value,
    ) -> mockito::Mock {
        server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_body(serde_json::json!({ "data": data }).to_string())
            .create()
    }

    fn args(
        product: Option<&str>,
        workflow: Option<&str>,
        reference: Option<&str>,
        pull_request: Option<u64>,
    ) -> BuildArgs {
        BuildArgs {
            product: product.map(String::from),
            workflow: workflow.map(String::from),
            reference: reference.map(String::from),
            pull_request,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Tests (fully-filtered, no prompts)
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_filtered_pipeline_submits_build_run() {
        let mut server = mockito::Server::new();

        mock_collection(
            &mut server,
            "/bundleIds",
            serde_json::json!([
                { "id": "B1", "attributes": { "identifier": "com.example.myapp" } }
            ]),
        );
        mock_collection(
            &mut server,
            "/ciProducts",
            serde_json::json!([{
                "id": "prod-1",
                "attributes": { "name": "MyApp", "productType": "APP" },
                "relationships": { "bundleId": { "data": { "id": "B1" } } }
            }]),
        );
        mock_collection(
            &mut server,
            "/ciProducts/prod-1/workflows",
            serde_json::json!([
                { "id": "wf-1", "attributes": { "name": "Release" } },
                { "id": "wf-2", "attributes": { "name": "Nightly" } }
            ]),
        );
        server
            .mock("GET", "/ciWorkflows/wf-1/repository")
            .with_body(
                r#"{ "data": { "id": "repo-1", "attributes": { "repositoryName": "myapp" } } }"#,
            )
            .create();
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/gitReferences",
            serde_json::json!([
                { "id": "ref-main", "attributes": { "name": "main", "kind": "BRANCH" } },
                { "id": "ref-tag", "attributes": { "name": "v1.0", "kind": "TAG" } }
            ]),
        );
        let submit = server
            .mock("POST", "/ciBuildRuns")
            .match_body(Matcher::Json(serde_json::json!({
                "data": {
                    "type": "ciBuildRuns",
                    "relationships": {
                        "workflow": { "data": { "type": "ciWorkflows", "id": "wf-1" } },
                        "sourceBranchOrTag": {
                            "data": { "type": "scmGitReferences", "id": "ref-main" }
                        }
                    }
                }
            })))
            .with_status(201)
            .with_body(r#"{ "data": { "id": "run-1" } }"#)
            .create();

        let output = build(
            &client_for(&server),
            &args(Some("MyApp"), Some("Release"), Some("main"), None),
            OutputFormat::Pretty,
        )
        .unwrap();

        submit.assert();
        assert!(output.contains("Build started"));
        assert!(output.contains("main"));
    }

    #[test]
    fn test_pull_request_filter_resolves_by_number() {
        let mut server = mockito::Server::new();

        mock_collection(&mut server, "/bundleIds", serde_json::json!([]));
        mock_collection(
            &mut server,
            "/ciProducts",
            serde_json::json!([
                { "id": "prod-1", "attributes": { "name": "MyApp" } }
            ]),
        );
        mock_collection(
            &mut server,
            "/ciProducts/prod-1/workflows",
            serde_json::json!([{ "id": "wf-1", "attributes": { "name": "PR Checks" } }]),
        );
        server
            .mock("GET", "/ciWorkflows/wf-1/repository")
            .with_body(r#"{ "data": { "id": "repo-1", "attributes": {} } }"#)
            .create();
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/pullRequests",
            serde_json::json!([
                { "id": "pr-a", "attributes": { "number": 7, "title": "First" } },
                { "id": "pr-b", "attributes": { "number": 12, "title": "Second" } }
            ]),
        );
        let submit = server
            .mock("POST", "/ciBuildRuns")
            .match_body(Matcher::Json(serde_json::json!({
                "data": {
                    "type": "ciBuildRuns",
                    "relationships": {
                        "workflow": { "data": { "type": "ciWorkflows", "id": "wf-1" } },
                        "pullRequest": {
                            "data": { "type": "scmPullRequests", "id": "pr-b" }
                        }
                    }
                }
            })))
            .with_status(201)
            .with_body(r#"{ "data": { "id": "run-2" } }"#)
            .create();

        let output = build(
            &client_for(&server),
            &args(Some("MyApp"), Some("PR Checks"), None, Some(12)),
            OutputFormat::Pretty,
        )
        .unwrap();

        submit.assert();
        assert!(output.contains("#12 Second"));
    }

    #[test]
    fn test_product_miss_lists_available_products() {
        let mut server = mockito::Server::new();

        mock_collection(
            &mut server,
            "/bundleIds",
            serde_json::json!([
                { "id": "B1", "attributes": { "identifier": "com.example.one" } }
            ]),
        );
        mock_collection(
            &mut server,
            "/ciProducts",
            serde_json::json!([
                {
                    "id": "prod-1",
                    "attributes": { "name": "One" },
                    "relationships": { "bundleId": { "data": { "id": "B1" } } }
                },
                { "id": "prod-2", "attributes": { "name": "Two" } }
            ]),
        );

        let err = build(
            &client_for(&server),
            &args(Some("Missing"), None, None, None),
            OutputFormat::Pretty,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Product not found: Missing"));
        assert!(msg.contains("One (com.example.one)"));
        assert!(msg.contains("Two"));
    }

    #[test]
    fn test_conflicting_flags_fail_before_any_request() {
        let mut server = mockito::Server::new();
        let untouched = server.mock("GET", Matcher::Any).expect(0).create();

        let err = build(
            &client_for(&server),
            &args(None, None, Some("main"), Some(3)),
            OutputFormat::Pretty,
        )
        .unwrap_err();

        untouched.assert();
        assert!(matches!(err, XccError::ConflictingSource));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Source Disambiguation Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_explicit_reference_skips_pull_request_listing() {
        let mut server = mockito::Server::new();

        server
            .mock("GET", "/ciWorkflows/wf-1/repository")
            .with_body(r#"{ "data": { "id": "repo-1", "attributes": {} } }"#)
            .create();
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/gitReferences",
            serde_json::json!([
                { "id": "ref-main", "attributes": { "name": "main", "kind": "BRANCH" } }
            ]),
        );
        let prs = server
            .mock("GET", "/scmRepositories/repo-1/pullRequests")
            .match_query(Matcher::Any)
            .expect(0)
            .create();

        let client = client_for(&server);
        let repository = client.get_repository("wf-1").unwrap();
        let (source, label) =
            resolve_source(&client, &repository, &args(None, None, Some("main"), None)).unwrap();

        prs.assert();
        assert_eq!(source, BuildSource::Reference("ref-main".to_string()));
        assert_eq!(label, "main (branch)");
    }

    #[test]
    fn test_no_pull_requests_defaults_to_reference_without_prompting() {
        let mut server = mockito::Server::new();

        server
            .mock("GET", "/ciWorkflows/wf-1/repository")
            .with_body(r#"{ "data": { "id": "repo-1", "attributes": {} } }"#)
            .create();
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/pullRequests",
            serde_json::json!([]),
        );
        // An empty reference list makes the stage fail with a reference
        // not-found, proving the decision took the reference path with no
        // source-type prompt in between.
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/gitReferences",
            serde_json::json!([]),
        );

        let client = client_for(&server);
        let repository = client.get_repository("wf-1").unwrap();
        let err = resolve_source(&client, &repository, &args(None, None, None, None));

        match err {
            Err(XccError::NotFound { kind, .. }) => assert_eq!(kind, "Git reference"),
            other => panic!("expected reference-path NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_miss_lists_branches_and_tags() {
        let mut server = mockito::Server::new();

        server
            .mock("GET", "/ciWorkflows/wf-1/repository")
            .with_body(r#"{ "data": { "id": "repo-1", "attributes": {} } }"#)
            .create();
        mock_collection(
            &mut server,
            "/scmRepositories/repo-1/gitReferences",
            serde_json::json!([
                { "id": "ref-main", "attributes": { "name": "main", "kind": "BRANCH" } },
                { "id": "ref-tag", "attributes": { "name": "v1.0", "kind": "TAG" } }
            ]),
        );

        let client = client_for(&server);
        let repository = client.get_repository("wf-1").unwrap();
        let err = resolve_source(
            &client,
            &repository,
            &args(None, None, Some("develop"), None),
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Git reference not found: develop"));
        assert!(msg.contains("main (branch)"));
        assert!(msg.contains("v1.0 (tag)"));
    }
}
