use serde::{Deserialize, Serialize};

/// Envelope for a paged collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: PageLinks,
}

/// Envelope for a single-resource endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleResponse<T> {
    pub data: T,
}

/// Pagination links; `next` is an absolute URL when more pages exist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub this: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A registered bundle ID (the authoritative identifier list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleId {
    pub id: String,
    pub attributes: BundleIdAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleIdAttributes {
    pub identifier: String,
    pub name: Option<String>,
}

/// An Xcode Cloud product (ciProducts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub attributes: ProductAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<ProductRelationships>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    pub name: String,
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRelationships {
    pub bundle_id: Option<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipData {
    pub id: String,
}

impl Product {
    /// The related bundle identifier, however the API chose to express it
    pub fn bundle_identifier(&self) -> Option<&str> {
        self.relationships
            .as_ref()?
            .bundle_id
            .as_ref()?
            .data
            .as_ref()
            .map(|data| data.id.as_str())
    }

    pub fn display_name(&self) -> String {
        match self.bundle_identifier() {
            Some(bundle_id) => format!("{} ({})", self.attributes.name, bundle_id),
            None => self.attributes.name.clone(),
        }
    }
}

/// An Xcode Cloud workflow (ciWorkflows)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub attributes: WorkflowAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowAttributes {
    pub name: String,
    pub description: Option<String>,
}

/// The source-control repository backing a workflow (scmRepositories)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub attributes: RepositoryAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAttributes {
    pub repository_name: Option<String>,
    pub owner_name: Option<String>,
}

/// A branch or tag in a repository (scmGitReferences)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitReference {
    pub id: String,
    pub attributes: GitReferenceAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitReferenceAttributes {
    pub name: String,
    pub canonical_name: Option<String>,
    pub kind: ReferenceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReferenceKind {
    Branch,
    Tag,
    #[serde(other)]
    Unknown,
}

impl GitReference {
    pub fn display_name(&self) -> String {
        let kind = match self.attributes.kind {
            ReferenceKind::Branch => "branch",
            ReferenceKind::Tag => "tag",
            ReferenceKind::Unknown => "ref",
        };
        format!("{} ({kind})", self.attributes.name)
    }
}

/// An open pull request in a repository (scmPullRequests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub attributes: PullRequestAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestAttributes {
    pub number: u64,
    pub title: String,
    pub source_branch_name: Option<String>,
    pub destination_branch_name: Option<String>,
}

impl PullRequest {
    pub fn display_name(&self) -> String {
        format!("#{} {}", self.attributes.number, self.attributes.title)
    }
}

/// The single source a build run starts from, holding the resource id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSource {
    Reference(String),
    PullRequest(String),
}

/// Patch each product's bundleId relationship with the public identifier.
///
/// The relationship sometimes carries the provider's internal database id
/// instead of the human-readable identifier; when that id matches an entry
/// in the authoritative bundle-id list, swap in the identifier string.
/// Product order is preserved and non-matching products are left alone, so
/// a second pass over already-patched products changes nothing.
pub fn reconcile_bundle_ids(products: &mut [Product], bundle_ids: &[BundleId]) {
    for product in products {
        let Some(data) = product
            .relationships
            .as_mut()
            .and_then(|rels| rels.bundle_id.as_mut())
            .and_then(|rel| rel.data.as_mut())
        else {
            continue;
        };

        if let Some(entry) = bundle_ids.iter().find(|b| b.id == data.id) {
            data.id = entry.attributes.identifier.clone();
        }
    }
}
