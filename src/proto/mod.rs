//! Wire schema of the downstream gRPC services.
//!
//! Message layouts mirror `planner.proto` and `rag.proto` as served by the
//! planner and RAG services. The clients are thin unary wrappers over a
//! shared [`Channel`]; no retries, no interceptors.

pub mod planner;
pub mod rag;

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{GrpcMethod, Request, Status};

/// Issue a single unary call on `grpc`.
pub(crate) async fn unary<Req, Resp>(
    grpc: &mut tonic::client::Grpc<Channel>,
    service: &'static str,
    method: &'static str,
    path: &'static str,
    message: Req,
) -> Result<Resp, Status>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    grpc.ready()
        .await
        .map_err(|e| Status::unavailable(format!("{service} not ready: {e}")))?;

    let mut request = Request::new(message);
    request
        .extensions_mut()
        .insert(GrpcMethod::new(service, method));

    let codec = ProstCodec::<Req, Resp>::default();
    grpc.unary(request, PathAndQuery::from_static(path), codec)
        .await
        .map(tonic::Response::into_inner)
}
