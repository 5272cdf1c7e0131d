// Management Entity Records (qdrouterd schema subset)
//
// Attribute names follow the camelCase keys printed by `qdmanage query`.
// Everything except name/identity is optional: older routers omit attributes
// and qdmanage drops null ones.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Router instance (`org.apache.qpid.dispatch.router`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Router {
    pub name: String,
    pub identity: String,
    pub id: Option<String>,
    pub mode: Option<String>,
    pub area: Option<String>,
    pub version: Option<String>,
    pub addr_count: Option<u64>,
    pub link_count: Option<u64>,
    pub node_count: Option<u64>,
    pub connection_count: Option<u64>,
    pub presettled_deliveries: Option<u64>,
    pub dropped_presettled_deliveries: Option<u64>,
}

impl Entity for Router {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router";
}

/// Routing table address (`org.apache.qpid.dispatch.router.address`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub name: String,
    pub identity: String,
    pub key: Option<String>,
    pub distribution: Option<String>,
    pub in_process: Option<u64>,
    pub subscriber_count: Option<u64>,
    pub remote_count: Option<u64>,
    pub container_count: Option<u64>,
    pub remote_host_routers: Option<Vec<String>>,
    pub deliveries_ingress: Option<u64>,
    pub deliveries_egress: Option<u64>,
    pub deliveries_transit: Option<u64>,
    pub deliveries_to_container: Option<u64>,
    pub deliveries_from_container: Option<u64>,
}

impl Entity for Address {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router.address";
}

/// Open AMQP connection (`org.apache.qpid.dispatch.connection`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connection {
    pub name: String,
    pub identity: String,
    pub container: Option<String>,
    pub host: Option<String>,
    pub role: Option<String>,
    pub dir: Option<String>,
    pub opened: Option<bool>,
    pub oper_status: Option<String>,
    pub is_authenticated: Option<bool>,
    pub is_encrypted: Option<bool>,
    pub sasl: Option<String>,
    pub user: Option<String>,
    pub ssl_proto: Option<String>,
    pub tenant: Option<String>,
    pub properties: Option<serde_json::Value>,
}

impl Entity for Connection {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.connection";
}

/// Router link (`org.apache.qpid.dispatch.router.link`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub name: String,
    pub identity: String,
    pub link_type: Option<String>,
    pub link_dir: Option<String>,
    pub link_name: Option<String>,
    pub owning_addr: Option<String>,
    pub connection_id: Option<u64>,
    pub peer: Option<String>,
    pub admin_status: Option<String>,
    pub oper_status: Option<String>,
    pub capacity: Option<u64>,
    pub undelivered_count: Option<u64>,
    pub unsettled_count: Option<u64>,
    pub delivery_count: Option<u64>,
    pub presettled_count: Option<u64>,
    pub accepted_count: Option<u64>,
    pub rejected_count: Option<u64>,
    pub released_count: Option<u64>,
    pub modified_count: Option<u64>,
}

impl Entity for Link {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router.link";
}

/// Listener configuration (`org.apache.qpid.dispatch.listener`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listener {
    pub name: String,
    pub identity: String,
    pub host: Option<String>,
    pub port: Option<String>,
    pub role: Option<String>,
    pub cost: Option<u64>,
    pub authenticate_peer: Option<bool>,
    pub sasl_mechanisms: Option<String>,
    pub ssl_profile: Option<String>,
    pub require_ssl: Option<bool>,
    pub http: Option<bool>,
    pub idle_timeout_seconds: Option<u64>,
}

impl Entity for Listener {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.listener";
}

/// Connector configuration and status (`org.apache.qpid.dispatch.connector`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connector {
    pub name: String,
    pub identity: String,
    pub host: Option<String>,
    pub port: Option<String>,
    pub role: Option<String>,
    pub cost: Option<u64>,
    pub ssl_profile: Option<String>,
    pub verify_hostname: Option<bool>,
    pub connection_status: Option<String>,
    pub connection_msg: Option<String>,
}

impl Entity for Connector {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.connector";
}

/// Remote router known to the routing protocol (`org.apache.qpid.dispatch.router.node`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub name: String,
    pub identity: String,
    pub id: Option<String>,
    pub protocol_version: Option<u64>,
    pub instance: Option<u64>,
    pub link_state: Option<Vec<String>>,
    pub next_hop: Option<String>,
    pub valid_origins: Option<Vec<String>>,
    pub address: Option<String>,
    pub router_link: Option<u64>,
    pub cost: Option<u64>,
    pub last_topo_change: Option<u64>,
}

impl Entity for Node {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router.node";
}

/// Link route (`org.apache.qpid.dispatch.router.config.linkRoute`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkRoute {
    pub name: String,
    pub identity: String,
    pub prefix: Option<String>,
    pub pattern: Option<String>,
    pub direction: Option<String>,
    pub container_id: Option<String>,
    pub connection: Option<String>,
    pub add_external_prefix: Option<String>,
    pub del_external_prefix: Option<String>,
    pub oper_status: Option<String>,
}

impl Entity for LinkRoute {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router.config.linkRoute";
}

/// Auto link (`org.apache.qpid.dispatch.router.config.autoLink`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoLink {
    pub name: String,
    pub identity: String,
    pub address: Option<String>,
    pub direction: Option<String>,
    pub phase: Option<u64>,
    pub container_id: Option<String>,
    pub connection: Option<String>,
    pub external_address: Option<String>,
    pub oper_status: Option<String>,
    pub last_error: Option<String>,
}

impl Entity for AutoLink {
    const ENTITY_TYPE: &'static str = "org.apache.qpid.dispatch.router.config.autoLink";
}
