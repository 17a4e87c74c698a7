pub mod ford_fulkerson;
