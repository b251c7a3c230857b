pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod errors;
        pub mod ports;
    }
    pub mod infrastructure {
        pub mod background;
        pub mod store;
    }
}

pub mod modules {
    pub mod timers {
        pub mod core {
            pub mod interval;
            pub mod project;
        }
        pub mod use_cases {
            pub mod manage_projects {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_timers {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod goals {
        pub mod core {
            pub mod goal;
            pub mod progress;
            pub mod streak;
        }
        pub mod use_cases {
            pub mod sync_achievements {
                pub mod handler;
            }
            pub mod goal_progress {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
            }
            pub mod manage_goals {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
    pub mod reports {
        pub mod core {
            pub mod activity;
            pub mod aggregate;
            pub mod buckets;
            pub mod report;
        }
        pub mod use_cases {
            pub mod build_report {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod query;
            }
            pub mod report_filters {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod timer_activity {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
