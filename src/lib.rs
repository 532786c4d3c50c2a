pub mod shared {
    pub mod core {
        pub mod metadata;
        pub mod precondition;
    }
    pub mod infrastructure {
        pub mod object_store;
    }
}

pub mod modules {
    pub mod resources {
        pub mod core {
            pub mod decide;
            pub mod list;
            pub mod merge;
            pub mod registry;
            pub mod resource;
            pub mod test_type;
        }
        pub mod application {
            pub mod errors;
            pub mod handlers;
            pub mod write;
        }
        pub mod use_cases {
            pub mod create_resource {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_resource {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod replace_resource {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_resource {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_resource {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_resources {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod stream_get_resource {
                pub mod handler;
            }
            pub mod stream_list_resources {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod client;
                pub mod http_support;
            }
        }
    }
}

pub mod shell;
