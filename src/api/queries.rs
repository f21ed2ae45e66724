//! GraphQL documents sent by [`super::GraphqlClient`].
//!
//! Selection sets mirror the structs in [`super::types`]; a field added there
//! has to be added here too.

macro_rules! page_info {
    () => {
        "pageInfo { hasNextPage hasPreviousPage startCursor endCursor }"
    };
}

macro_rules! team_fields {
    () => {
        "id key name"
    };
}

macro_rules! issue_fields {
    () => {
        concat!(
            "id identifier title description priority priorityLabel estimate url createdAt updatedAt ",
            "state { id name color type } assignee { id name email } team { ",
            team_fields!(),
            " }"
        )
    };
}

macro_rules! label_fields {
    () => {
        "id name color description isGroup parent { id } createdAt"
    };
}

macro_rules! comment_fields {
    () => {
        "id body createdAt updatedAt user { id name email }"
    };
}

macro_rules! document_fields {
    () => {
        "id title content icon color project { id name } creator { id name email } createdAt updatedAt"
    };
}

macro_rules! initiative_fields {
    () => {
        concat!(
            "id name description status icon color targetDate createdAt updatedAt ",
            "owner { id name email } creator { id name email } projects { nodes { id name progress } }"
        )
    };
}

pub const VIEWER: &str = concat!(
    "query Viewer { viewer { id name email displayName active admin timezone createdAt ",
    "organization { id name urlKey } teams { nodes { ",
    team_fields!(),
    " } } } }"
);

pub const TEAMS_BY_KEY: &str = concat!(
    "query TeamsByKey($key: String!) { teams(filter: { key: { eq: $key } }, first: 1) { nodes { ",
    team_fields!(),
    " } } }"
);

pub const ISSUE_BY_TEAM_AND_NUMBER: &str = concat!(
    "query IssueByTeamAndNumber($teamId: ID!, $number: Float!) { ",
    "issues(filter: { team: { id: { eq: $teamId } }, number: { eq: $number } }, first: 1) ",
    "{ nodes { id identifier } } }"
);

pub const ISSUES: &str = concat!(
    "query Issues($filter: IssueFilter, $first: Int, $after: String) { ",
    "issues(filter: $filter, first: $first, after: $after) { nodes { ",
    issue_fields!(),
    " } ",
    page_info!(),
    " } }"
);

pub const ISSUE: &str = concat!(
    "query Issue($id: String!) { issue(id: $id) { ",
    issue_fields!(),
    " } }"
);

pub const ISSUE_LABELS: &str = concat!(
    "query IssueLabels($id: String!) { issue(id: $id) { labels { nodes { ",
    label_fields!(),
    " } } } }"
);

pub const ISSUE_COMMENTS: &str = concat!(
    "query IssueComments($id: String!, $first: Int, $after: String) { issue(id: $id) { ",
    "comments(first: $first, after: $after) { nodes { ",
    comment_fields!(),
    " } ",
    page_info!(),
    " } } }"
);

pub const SEARCH_ISSUES: &str = concat!(
    "query SearchIssues($term: String!, $filter: IssueFilter, $first: Int, $after: String) { ",
    "searchIssues(term: $term, filter: $filter, first: $first, after: $after) { nodes { ",
    issue_fields!(),
    " } ",
    page_info!(),
    " } }"
);

pub const ISSUE_CREATE: &str = concat!(
    "mutation IssueCreate($input: IssueCreateInput!) { issueCreate(input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const ISSUE_UPDATE: &str = concat!(
    "mutation IssueUpdate($id: String!, $input: IssueUpdateInput!) { ",
    "issueUpdate(id: $id, input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const ISSUE_ARCHIVE: &str =
    "mutation IssueArchive($id: String!) { issueArchive(id: $id) { success } }";

pub const ISSUE_DELETE: &str =
    "mutation IssueDelete($id: String!) { issueDelete(id: $id) { success } }";

pub const COMMENT_CREATE: &str = concat!(
    "mutation CommentCreate($input: CommentCreateInput!) { commentCreate(input: $input) { success comment { ",
    comment_fields!(),
    " } } }"
);

pub const DOCUMENTS: &str = concat!(
    "query Documents($filter: DocumentFilter, $first: Int, $after: String) { ",
    "documents(filter: $filter, first: $first, after: $after) { nodes { ",
    document_fields!(),
    " } ",
    page_info!(),
    " } }"
);

pub const DOCUMENT: &str = concat!(
    "query Document($id: String!) { document(id: $id) { ",
    document_fields!(),
    " } }"
);

pub const DOCUMENT_CREATE: &str = concat!(
    "mutation DocumentCreate($input: DocumentCreateInput!) { documentCreate(input: $input) { success document { ",
    document_fields!(),
    " } } }"
);

pub const DOCUMENT_UPDATE: &str = concat!(
    "mutation DocumentUpdate($id: String!, $input: DocumentUpdateInput!) { ",
    "documentUpdate(id: $id, input: $input) { success document { ",
    document_fields!(),
    " } } }"
);

pub const DOCUMENT_DELETE: &str =
    "mutation DocumentDelete($id: String!) { documentDelete(id: $id) { success } }";

pub const INITIATIVES: &str = concat!(
    "query Initiatives($first: Int, $after: String) { ",
    "initiatives(first: $first, after: $after) { nodes { ",
    initiative_fields!(),
    " } ",
    page_info!(),
    " } }"
);

pub const INITIATIVE: &str = concat!(
    "query Initiative($id: String!) { initiative(id: $id) { ",
    initiative_fields!(),
    " } }"
);

pub const INITIATIVE_CREATE: &str = concat!(
    "mutation InitiativeCreate($input: InitiativeCreateInput!) { ",
    "initiativeCreate(input: $input) { success initiative { ",
    initiative_fields!(),
    " } } }"
);

pub const INITIATIVE_UPDATE: &str = concat!(
    "mutation InitiativeUpdate($id: String!, $input: InitiativeUpdateInput!) { ",
    "initiativeUpdate(id: $id, input: $input) { success initiative { ",
    initiative_fields!(),
    " } } }"
);

pub const INITIATIVE_DELETE: &str =
    "mutation InitiativeDelete($id: String!) { initiativeDelete(id: $id) { success } }";

pub const PROJECTS: &str = concat!(
    "query Projects($filter: ProjectFilter, $first: Int, $after: String) { ",
    "projects(filter: $filter, first: $first, after: $after) { nodes { ",
    "id name description state progress targetDate url createdAt updatedAt } ",
    page_info!(),
    " } }"
);

pub const USERS: &str = concat!(
    "query Users($filter: UserFilter, $first: Int, $after: String) { ",
    "users(filter: $filter, first: $first, after: $after) { nodes { ",
    "id name displayName email active admin guest avatarUrl createdAt } ",
    page_info!(),
    " } }"
);

pub const LABELS: &str = concat!(
    "query Labels($filter: IssueLabelFilter, $first: Int, $after: String) { ",
    "issueLabels(filter: $filter, first: $first, after: $after) { nodes { ",
    label_fields!(),
    " } ",
    page_info!(),
    " } }"
);

pub const WORKFLOW_STATES: &str = concat!(
    "query WorkflowStates($filter: WorkflowStateFilter, $first: Int, $after: String) { ",
    "workflowStates(filter: $filter, first: $first, after: $after) { nodes { ",
    "id name color type position team { ",
    team_fields!(),
    " } } ",
    page_info!(),
    " } }"
);
