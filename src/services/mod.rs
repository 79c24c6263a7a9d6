pub mod agent_registry;
