//! Messages and client stub for the `opensds.Dock` gRPC service.
//!
//! Checked in in `tonic-build` output form (tonic 0.12, prost 0.13) so that
//! building the workspace does not need `protoc`. The service contract is owned
//! by the dock; keep field tags in sync with its schema.

#![allow(clippy::all, clippy::pedantic)]

/// Parameters for one volume-family operation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VolumeRequest {
    #[prost(string, tag = "1")]
    pub resource_type: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub volume_type: ::prost::alloc::string::String,
    #[prost(int32, tag = "5")]
    pub size: i32,
    #[prost(bool, tag = "6")]
    pub allow_details: bool,
    #[prost(string, tag = "7")]
    pub action_type: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub host: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub device: ::prost::alloc::string::String,
    #[prost(string, tag = "10")]
    pub attachment_id: ::prost::alloc::string::String,
    #[prost(string, tag = "11")]
    pub mountpoint: ::prost::alloc::string::String,
    #[prost(string, tag = "12")]
    pub snapshot_id: ::prost::alloc::string::String,
    #[prost(string, tag = "13")]
    pub snapshot_name: ::prost::alloc::string::String,
    #[prost(string, tag = "14")]
    pub description: ::prost::alloc::string::String,
    /// JSON-encoded dock record selected by the orchestrator.
    #[prost(string, tag = "15")]
    pub dock_info: ::prost::alloc::string::String,
}
/// Parameters for one share-family operation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShareRequest {
    #[prost(string, tag = "1")]
    pub resource_type: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub share_type: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub share_proto: ::prost::alloc::string::String,
    #[prost(int32, tag = "6")]
    pub size: i32,
    #[prost(bool, tag = "7")]
    pub allow_details: bool,
    #[prost(string, tag = "8")]
    pub action_type: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub device: ::prost::alloc::string::String,
    #[prost(string, tag = "10")]
    pub mountpoint: ::prost::alloc::string::String,
    #[prost(string, tag = "11")]
    pub description: ::prost::alloc::string::String,
}
/// Result of any dock operation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(string, tag = "1")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub error: ::prost::alloc::string::String,
}
/// Generated client implementations.
pub mod dock_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    use tonic::codegen::http::Uri;
    #[derive(Debug, Clone)]
    pub struct DockClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl DockClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> DockClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        /// Compress requests with the given encoding.
        ///
        /// This requires the server to support it otherwise it might respond with an
        /// error.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        ///
        /// Default: `4MB`
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        ///
        /// Default: `usize::MAX`
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        pub async fn create_volume(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/CreateVolume");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "CreateVolume"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn get_volume(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/GetVolume");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "GetVolume"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn delete_volume(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/DeleteVolume");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "DeleteVolume"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn create_volume_attachment(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/CreateVolumeAttachment");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "CreateVolumeAttachment"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn update_volume_attachment(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/UpdateVolumeAttachment");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "UpdateVolumeAttachment"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn delete_volume_attachment(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/DeleteVolumeAttachment");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "DeleteVolumeAttachment"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn create_volume_snapshot(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/CreateVolumeSnapshot");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "CreateVolumeSnapshot"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn get_volume_snapshot(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/GetVolumeSnapshot");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "GetVolumeSnapshot"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn delete_volume_snapshot(
            &mut self,
            request: impl tonic::IntoRequest<super::VolumeRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/DeleteVolumeSnapshot");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "DeleteVolumeSnapshot"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn create_share(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/CreateShare");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "CreateShare"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn get_share(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/GetShare");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "GetShare"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn list_shares(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/ListShares");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "ListShares"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn delete_share(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/DeleteShare");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "DeleteShare"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn attach_share(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/AttachShare");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "AttachShare"));
            self.inner.unary(req, path, codec).await
        }
        pub async fn detach_share(
            &mut self,
            request: impl tonic::IntoRequest<super::ShareRequest>,
        ) -> std::result::Result<tonic::Response<super::Response>, tonic::Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::new(
                        tonic::Code::Unknown,
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/opensds.Dock/DetachShare");
            let mut req = request.into_request();
            req.extensions_mut().insert(GrpcMethod::new("opensds.Dock", "DetachShare"));
            self.inner.unary(req, path, codec).await
        }
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn volume_request_carries_dock_info_in_field_15() {
        let request = VolumeRequest {
            id: "vol-1".to_string(),
            size: 10,
            dock_info: r#"{"Endpoint":"10.0.0.5"}"#.to_string(),
            ..VolumeRequest::default()
        };
        let bytes = request.encode_to_vec();

        // Field 15, wire type 2 (length-delimited).
        assert!(bytes.contains(&((15 << 3) | 2)));
        assert_eq!(VolumeRequest::decode(bytes.as_slice()).unwrap(), request);
    }

    #[test]
    fn dock_info_alone_encodes_as_field_15() {
        let request = VolumeRequest {
            dock_info: "{}".to_string(),
            ..VolumeRequest::default()
        };
        assert_eq!(request.encode_to_vec(), vec![0x7a, 2, b'{', b'}']);
    }

    #[test]
    fn share_request_and_response_decode_what_they_encode() {
        let share = ShareRequest {
            id: "share-1".to_string(),
            share_proto: "nfs".to_string(),
            size: 2,
            ..ShareRequest::default()
        };
        assert_eq!(
            ShareRequest::decode(share.encode_to_vec().as_slice()).unwrap(),
            share
        );

        let response = Response {
            status: "Success".to_string(),
            message: "done".to_string(),
            error: String::new(),
        };
        // status is field 1.
        assert_eq!(&response.encode_to_vec()[..2], &[0x0a, 7]);
        assert_eq!(
            Response::decode(response.encode_to_vec().as_slice()).unwrap(),
            response
        );
    }
}
