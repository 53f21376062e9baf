mod confession;
