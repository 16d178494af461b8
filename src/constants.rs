// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Resource kind names used in log lines and errors
pub mod kinds {
    pub const DEPLOYMENT: &str = "deployment";
    pub const SERVICE: &str = "service";
    pub const REPLICA_SET: &str = "replica set";
}

/// Defaults for the throwaway PostgreSQL instance
pub mod defaults {
    pub const NAME: &str = "postgres";
    pub const REPLICAS: i32 = 1;
    pub const IMAGE: &str = "postgres:9.4";
    pub const IMAGE_PULL_POLICY: &str = "Always";

    pub const USER: &str = "kong";
    pub const PASSWORD: &str = "kong";
    pub const DATABASE: &str = "kong";
    pub const DATA_DIR: &str = "/var/lib/postgresql/data/pgdata";

    pub const PORT: i32 = 5432;
    pub const CONTAINER_PORT_NAME: &str = "postgres";
    pub const SERVICE_PORT_NAME: &str = "pgql";

    pub const VOLUME_NAME: &str = "pg-data";
    pub const VOLUME_MOUNT_PATH: &str = "/var/lib/postgresql/data";
}

/// Label keys
pub mod labels {
    /// Carried by the pod template and used as the service selector
    pub const APP: &str = "app";
    /// Carried by the service itself
    pub const NAME: &str = "name";
}

/// Environment variable names understood by the postgres image
pub mod env {
    pub const USER: &str = "POSTGRES_USER";
    pub const PASSWORD: &str = "POSTGRES_PASSWORD";
    pub const DATABASE: &str = "POSTGRES_DB";
    pub const DATA_DIR: &str = "PGDATA";
}
