//! Shared utilities for integration tests: scripted downstream stubs and a
//! gateway bound to an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tonic::Status;

use course_gateway::config::GatewayConfig;
use course_gateway::downstream::{Downstreams, PlannerCaller, PlannerRpc, RagCaller, RagRpc};
use course_gateway::http::HttpServer;
use course_gateway::lifecycle::Shutdown;
use course_gateway::preference::PreferenceStore;
use course_gateway::proto::{planner, rag};

/// How a stub answers a call.
#[derive(Clone)]
pub enum Behavior<T> {
    Respond(T),
    Fail(Status),
    /// Never answer; the caller's deadline has to fire.
    Hang,
}

impl<T: Clone> Behavior<T> {
    async fn run(&self) -> Result<T, Status> {
        match self {
            Behavior::Respond(value) => Ok(value.clone()),
            Behavior::Fail(status) => Err(status.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// Planner stub recording every `Solve` request it receives.
pub struct StubPlanner {
    pub solve: Mutex<Behavior<planner::SolveResponse>>,
    pub health: Mutex<Behavior<planner::HealthResponse>>,
    pub solve_requests: Mutex<Vec<planner::SolveRequest>>,
    pub calls: AtomicUsize,
}

impl StubPlanner {
    pub fn responding(response: planner::SolveResponse) -> Arc<Self> {
        Arc::new(Self {
            solve: Mutex::new(Behavior::Respond(response)),
            health: Mutex::new(Behavior::Respond(planner::HealthResponse {
                status: "ok".into(),
            })),
            solve_requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_solve(&self, behavior: Behavior<planner::SolveResponse>) {
        *self.solve.lock().unwrap() = behavior;
    }

    pub fn set_health(&self, behavior: Behavior<planner::HealthResponse>) {
        *self.health.lock().unwrap() = behavior;
    }

    pub fn last_solve(&self) -> Option<planner::SolveRequest> {
        self.solve_requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlannerRpc for StubPlanner {
    async fn solve(&self, request: planner::SolveRequest) -> Result<planner::SolveResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.solve_requests.lock().unwrap().push(request);
        let behavior = self.solve.lock().unwrap().clone();
        behavior.run().await
    }

    async fn health(&self) -> Result<planner::HealthResponse, Status> {
        let behavior = self.health.lock().unwrap().clone();
        behavior.run().await
    }
}

/// RAG stub. Every method shares one call counter.
pub struct StubRag {
    pub query: Mutex<Behavior<rag::QueryResponse>>,
    pub course: Mutex<Behavior<rag::CourseInfoResponse>>,
    pub recommend: Mutex<Behavior<rag::RecommendResponse>>,
    pub health: Mutex<Behavior<rag::HealthResponse>>,
    pub query_requests: Mutex<Vec<rag::QueryRequest>>,
    pub recommend_requests: Mutex<Vec<rag::RecommendRequest>>,
    pub calls: AtomicUsize,
}

impl StubRag {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            query: Mutex::new(Behavior::Respond(rag::QueryResponse {
                answer: "COP3502 covers programming fundamentals.".into(),
                sources: vec![rag::SourceDocument {
                    course_code: "COP3502".into(),
                    course_name: "Programming Fundamentals 1".into(),
                    content: "Introduction to programming".into(),
                    relevance_score: 0.5,
                }],
                error_message: String::new(),
            })),
            course: Mutex::new(Behavior::Respond(rag::CourseInfoResponse {
                found: true,
                course_code: "COP3502".into(),
                course_name: "Programming Fundamentals 1".into(),
                credits: 3,
                ..Default::default()
            })),
            recommend: Mutex::new(Behavior::Respond(rag::RecommendResponse {
                courses: vec![rag::RecommendedCourse {
                    course_code: "COP3503".into(),
                    course_name: "Programming Fundamentals 2".into(),
                    credits: 3,
                    score: 0.75,
                    ..Default::default()
                }],
                total_credits: 3,
                explanation: "Natural next step.".into(),
                error_message: String::new(),
            })),
            health: Mutex::new(Behavior::Respond(rag::HealthResponse {
                status: "ok".into(),
            })),
            query_requests: Mutex::new(Vec::new()),
            recommend_requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every method fails as if the service were down.
    pub fn unreachable() -> Arc<Self> {
        let stub = Self::new();
        let down = || Status::unavailable("tcp connect error: Connection refused");
        *stub.query.lock().unwrap() = Behavior::Fail(down());
        *stub.course.lock().unwrap() = Behavior::Fail(down());
        *stub.recommend.lock().unwrap() = Behavior::Fail(down());
        *stub.health.lock().unwrap() = Behavior::Fail(down());
        stub
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<rag::QueryRequest> {
        self.query_requests.lock().unwrap().last().cloned()
    }

    pub fn last_recommend(&self) -> Option<rag::RecommendRequest> {
        self.recommend_requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RagRpc for StubRag {
    async fn query(&self, request: rag::QueryRequest) -> Result<rag::QueryResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.query_requests.lock().unwrap().push(request);
        let behavior = self.query.lock().unwrap().clone();
        behavior.run().await
    }

    async fn get_course_info(
        &self,
        _request: rag::CourseInfoRequest,
    ) -> Result<rag::CourseInfoResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.course.lock().unwrap().clone();
        behavior.run().await
    }

    async fn recommend(&self, request: rag::RecommendRequest) -> Result<rag::RecommendResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recommend_requests.lock().unwrap().push(request);
        let behavior = self.recommend.lock().unwrap().clone();
        behavior.run().await
    }

    async fn health(&self) -> Result<rag::HealthResponse, Status> {
        let behavior = self.health.lock().unwrap().clone();
        behavior.run().await
    }
}

/// The planner response from the end-to-end scenario: one course, 3 credits.
pub fn one_course_schedule() -> planner::SolveResponse {
    planner::SolveResponse {
        status: "success".into(),
        scheduled_courses: vec![planner::ScheduledCourse {
            course_id: "COP3502".into(),
            course_name: "Programming Fundamentals 1".into(),
            credits: 3,
            day: "M".into(),
            period: 4,
            course_type: "major".into(),
        }],
        total_credits: 3,
        error_message: String::new(),
    }
}

/// Deadline used for every downstream call in tests.
pub const TEST_DEADLINE: Duration = Duration::from_millis(300);

/// Session slot cap used by test gateways.
pub const SESSION_CAP: usize = 8;

/// A running gateway.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub store: PreferenceStore,
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway on an ephemeral port in front of the given stubs.
pub async fn start_gateway(planner: Arc<StubPlanner>, rag: Arc<StubRag>) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.timeouts.rag_query_secs = 1;
    config.timeouts.rag_course_secs = 1;
    config.timeouts.rag_recommend_secs = 1;
    config.timeouts.health_secs = 1;
    config.sessions.max_sessions = SESSION_CAP;
    let downstreams = Downstreams {
        planner: PlannerCaller::new(planner, TEST_DEADLINE, TEST_DEADLINE),
        rag: RagCaller::new(rag, &config.timeouts),
    };
    let store = PreferenceStore::from_config(&config.sessions);
    let server = HttpServer::with_store(config, downstreams, store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestGateway {
        addr,
        store,
        shutdown,
    }
}
