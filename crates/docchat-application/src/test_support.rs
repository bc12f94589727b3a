//! In-memory collaborators for use case tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use docchat_core::DocchatError;
use docchat_core::chat::{HistoryApi, PromptRecord};
use docchat_core::error::{Collaborator, Result};
use docchat_core::llm::{LlmAnswer, LlmApi, SessionToken};
use docchat_core::state::{AuthStateRepository, StoredAuth};
use docchat_core::user::{AuthApi, ManagedUser, SigninRequest, SignupRequest, User, UserId};
use docchat_core::workspace::{CoreApi, Document, DocumentId, UploadFile, Workspace, WorkspaceId};

pub fn user(user_id: UserId, role_id: i64) -> User {
    User {
        user_id,
        user_name: format!("user{}", user_id),
        user_email: format!("user{}@example.com", user_id),
        token: None,
        role_id: Some(role_id),
    }
}

// Mock CoreApi backed by in-memory workspaces and documents
#[derive(Default)]
pub struct MockCoreApi {
    workspaces: Mutex<Vec<Workspace>>,
    documents: Mutex<Vec<Document>>,
    next_id: AtomicI64,
    pub fail_list_workspaces: AtomicBool,
    pub fail_register_document: AtomicBool,
    pub fail_documents_for: Mutex<Vec<WorkspaceId>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockCoreApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Seeds an active workspace and returns its id.
    pub fn seed_workspace(&self, name: &str, user_id: UserId) -> WorkspaceId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.workspaces.lock().unwrap().push(Workspace {
            id: Some(id),
            ..Workspace::new(name, user_id)
        });
        id
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    fn failure(message: &str) -> DocchatError {
        DocchatError::collaborator(Collaborator::CoreApi, message)
    }
}

#[async_trait]
impl CoreApi for MockCoreApi {
    async fn list_workspaces(&self, user_id: UserId) -> Result<Vec<Workspace>> {
        self.record("list_workspaces");
        if self.fail_list_workspaces.load(Ordering::SeqCst) {
            return Err(Self::failure("list unavailable"));
        }
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user_id && w.is_active)
            .cloned()
            .collect())
    }

    async fn create_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.record("create_workspace");
        self.seed_workspace(&workspace.name, workspace.user_id);
        Ok(())
    }

    async fn update_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.record("update_workspace");
        let mut workspaces = self.workspaces.lock().unwrap();
        match workspaces.iter_mut().find(|w| w.id == workspace.id) {
            Some(existing) => {
                *existing = workspace.clone();
                Ok(())
            }
            None => Err(Self::failure("no such workspace")),
        }
    }

    async fn delete_workspace(&self, workspace_id: WorkspaceId) -> Result<()> {
        self.record("delete_workspace");
        for ws in self.workspaces.lock().unwrap().iter_mut() {
            if ws.id == Some(workspace_id) {
                ws.is_active = false;
            }
        }
        Ok(())
    }

    async fn list_documents(&self, workspace_id: WorkspaceId) -> Result<Vec<Document>> {
        self.record("list_documents");
        if self.fail_documents_for.lock().unwrap().contains(&workspace_id) {
            return Err(Self::failure("documents unavailable"));
        }
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.workspace_id == workspace_id && d.is_active)
            .cloned()
            .collect())
    }

    async fn register_document(&self, document: &Document) -> Result<()> {
        self.record("register_document");
        if self.fail_register_document.load(Ordering::SeqCst) {
            return Err(Self::failure("registration rejected"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().push(Document {
            id: Some(id),
            ..document.clone()
        });
        Ok(())
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<()> {
        self.record("delete_document");
        for doc in self.documents.lock().unwrap().iter_mut() {
            if doc.id == Some(document_id) {
                doc.is_active = false;
            }
        }
        Ok(())
    }
}

// Mock LlmApi with scripted answers and optional per-question delays
#[derive(Default)]
pub struct MockLlmApi {
    pub fail_upload: AtomicBool,
    pub fail_query: AtomicBool,
    pub delays: Mutex<HashMap<String, Duration>>,
    pub uploads: Mutex<Vec<WorkspaceId>>,
    pub questions: Mutex<Vec<String>>,
}

impl MockLlmApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self, question: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(question.to_string(), delay);
    }
}

#[async_trait]
impl LlmApi for MockLlmApi {
    async fn upload_document(
        &self,
        _file: &UploadFile,
        workspace_id: WorkspaceId,
    ) -> Result<SessionToken> {
        self.uploads.lock().unwrap().push(workspace_id);
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(DocchatError::collaborator(
                Collaborator::LlmApi,
                "upload unavailable",
            ));
        }
        Ok(SessionToken::new(format!("session-{}", workspace_id)))
    }

    async fn query(&self, question: &str, session: &SessionToken) -> Result<LlmAnswer> {
        self.questions.lock().unwrap().push(question.to_string());
        let delay = self.delays.lock().unwrap().get(question).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(DocchatError::collaborator(
                Collaborator::LlmApi,
                "query timed out",
            ));
        }
        Ok(LlmAnswer {
            answer: format!("{} via {}", question, session),
            sources: Vec::new(),
        })
    }
}

// Mock HistoryApi keeping saved records in memory
#[derive(Default)]
pub struct MockHistoryApi {
    pub records: Mutex<Vec<PromptRecord>>,
    pub fail: AtomicBool,
    pub fetches: Mutex<Vec<(WorkspaceId, Option<String>)>>,
    pub deleted: Mutex<Vec<String>>,
}

impl MockHistoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<PromptRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DocchatError::collaborator(
                Collaborator::HistoryApi,
                "history unavailable",
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HistoryApi for MockHistoryApi {
    async fn save_prompt(&self, record: &PromptRecord) -> Result<()> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let prompt_id = records.len() as i64 + 1;
        records.push(PromptRecord {
            prompt_id: Some(prompt_id),
            ..record.clone()
        });
        Ok(())
    }

    async fn fetch_prompts(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        session_id: Option<&str>,
    ) -> Result<Vec<PromptRecord>> {
        self.fetches
            .lock()
            .unwrap()
            .push((workspace_id, session_id.map(str::to_string)));
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.workspace_id == workspace_id && r.user_id == user_id && r.is_active)
            .filter(|r| session_id.is_none() || r.session_id.as_deref() == session_id)
            .cloned()
            .collect())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.check()?;
        self.deleted.lock().unwrap().push(session_id.to_string());
        for record in self.records.lock().unwrap().iter_mut() {
            if record.session_id.as_deref() == Some(session_id) {
                record.is_active = false;
            }
        }
        Ok(())
    }
}

// Mock AuthApi with a fixed account table
#[derive(Default)]
pub struct MockAuthApi {
    pub accounts: Mutex<HashMap<String, (String, User)>>,
    pub managed: Mutex<Vec<ManagedUser>>,
    pub empty_success: AtomicBool,
}

impl MockAuthApi {
    pub fn with_account(email: &str, password: &str, user: User) -> Self {
        let api = Self::default();
        api.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user));
        api
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn signin(&self, credentials: &SigninRequest) -> Result<Vec<User>> {
        if self.empty_success.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        match self.accounts.lock().unwrap().get(&credentials.user_email) {
            Some((password, user)) if *password == credentials.user_pwd => Ok(vec![user.clone()]),
            _ => Err(DocchatError::InvalidCredentials(
                "Invalid email or password".to_string(),
            )),
        }
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&request.user_email) {
            return Err(DocchatError::collaborator(
                Collaborator::AuthApi,
                "Email already registered",
            ));
        }
        let user = User {
            user_id: accounts.len() as i64 + 100,
            user_name: request.user_name.clone(),
            user_email: request.user_email.clone(),
            token: None,
            role_id: Some(2),
        };
        accounts.insert(
            request.user_email.clone(),
            (request.user_pwd.clone(), user),
        );
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        Ok(self.managed.lock().unwrap().clone())
    }

    async fn update_user(&self, user: &ManagedUser) -> Result<()> {
        let mut managed = self.managed.lock().unwrap();
        match managed.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DocchatError::collaborator(
                Collaborator::AuthApi,
                "no such user",
            )),
        }
    }
}

// Mock AuthStateRepository
#[derive(Default)]
pub struct MockAuthStateRepository {
    pub state: Mutex<Option<StoredAuth>>,
    pub fail_load: AtomicBool,
}

impl MockAuthStateRepository {
    pub fn with_state(state: StoredAuth) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<StoredAuth> {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthStateRepository for MockAuthStateRepository {
    async fn load(&self) -> Result<StoredAuth> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(DocchatError::migration("unknown version"));
        }
        Ok(self.stored().unwrap_or_default())
    }

    async fn save(&self, state: &StoredAuth) -> Result<()> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.state.lock().unwrap() = None;
        Ok(())
    }
}
